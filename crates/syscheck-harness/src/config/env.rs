// crates/syscheck-harness/src/config/env.rs
// ============================================================================
// Module: Environment Overrides
// Description: SYSCHECK_* environment variables.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, and unparsable numbers fail
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys read by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Config file path override.
    Config,
    /// Scratch directory root.
    ScratchRoot,
    /// Iteration count (`0` loops forever).
    Iterations,
    /// Keep scratch directories after the run (`true`/`false` or `1`/`0`).
    KeepScratch,
}

impl HarnessEnv {
    /// Every key, for tests and diagnostics.
    pub const ALL: [Self; 4] = [Self::Config, Self::ScratchRoot, Self::Iterations, Self::KeepScratch];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "SYSCHECK_CONFIG",
            Self::ScratchRoot => "SYSCHECK_SCRATCH_ROOT",
            Self::Iterations => "SYSCHECK_ITERATIONS",
            Self::KeepScratch => "SYSCHECK_KEEP_SCRATCH",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed overrides derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvOverrides {
    /// Scratch root override.
    pub scratch_root: Option<PathBuf>,
    /// Iteration count override.
    pub iterations: Option<u64>,
    /// Keep-scratch override.
    pub keep_scratch: Option<bool>,
}

impl EnvOverrides {
    /// Loads overrides from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is not valid UTF-8, is empty, or fails
    /// to parse.
    pub fn load() -> Result<Self, String> {
        let scratch_root =
            read_env_nonempty(HarnessEnv::ScratchRoot.as_str())?.map(PathBuf::from);
        let iterations = read_env_nonempty(HarnessEnv::Iterations.as_str())?
            .map(|value| parse_iterations(HarnessEnv::Iterations.as_str(), &value))
            .transpose()?;
        let keep_scratch = read_env_nonempty(HarnessEnv::KeepScratch.as_str())?
            .map(|value| parse_bool(HarnessEnv::KeepScratch.as_str(), &value))
            .transpose()?;
        Ok(Self {
            scratch_root,
            iterations,
            keep_scratch,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
pub(crate) fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a non-negative iteration count.
fn parse_iterations(name: &str, raw: &str) -> Result<u64, String> {
    raw.trim().parse().map_err(|_| format!("{name} must be a non-negative integer"))
}

/// Parses a boolean literal.
fn parse_bool(name: &str, raw: &str) -> Result<bool, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
