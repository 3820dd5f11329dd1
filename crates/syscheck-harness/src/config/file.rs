// crates/syscheck-harness/src/config/file.rs
// ============================================================================
// Module: Config File
// Description: `syscheck.toml` loading and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! The config file is optional. An explicit path (flag or `SYSCHECK_CONFIG`)
//! must exist; the default `syscheck.toml` in the working directory is used
//! only when present. Files are size-limited, must be UTF-8, reject unknown
//! keys, and are validated after parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::env::HarnessEnv;
use super::env::read_env_nonempty;
use crate::report::ReportFormat;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "syscheck.toml";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum delay between iterations in milliseconds (one hour).
const MAX_DELAY_MS: u64 = 3_600_000;
/// Maximum length of a login name.
const MAX_USER_NAME_LENGTH: usize = 32;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Contents of `syscheck.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Loop settings.
    #[serde(default)]
    pub run: RunSection,
    /// Scratch directory settings.
    #[serde(default)]
    pub scratch: ScratchSection,
    /// Privilege settings.
    #[serde(default)]
    pub privilege: PrivilegeSection,
    /// Report settings.
    #[serde(default)]
    pub report: ReportSection,
}

/// `[run]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSection {
    /// Iteration count (`0` loops forever).
    #[serde(default)]
    pub iterations: Option<u64>,
    /// Delay between iterations in milliseconds.
    #[serde(default)]
    pub delay_ms: Option<u64>,
    /// Run for this many seconds instead of a fixed count.
    #[serde(default)]
    pub duration_secs: Option<u64>,
}

/// `[scratch]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScratchSection {
    /// Directory under which per-run scratch directories are created.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Keep scratch directories after the run.
    #[serde(default)]
    pub keep: Option<bool>,
}

/// `[privilege]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivilegeSection {
    /// Account that root-only programs switch to.
    #[serde(default)]
    pub unprivileged_user: Option<String>,
}

/// `[report]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    /// Output format.
    #[serde(default)]
    pub format: Option<ReportFormat>,
    /// Emit the errno summary at exit.
    #[serde(default)]
    pub errno_log: Option<bool>,
}

impl HarnessConfig {
    /// Loads configuration using the default resolution rules.
    ///
    /// Returns the default configuration when no path is given, the
    /// environment names none, and `syscheck.toml` does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate()?;
        self.scratch.validate()?;
        self.privilege.validate()?;
        Ok(())
    }
}

impl RunSection {
    /// Validates loop settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(delay) = self.delay_ms
            && delay > MAX_DELAY_MS
        {
            return Err(ConfigError::Invalid(format!(
                "run.delay_ms must be at most {MAX_DELAY_MS}"
            )));
        }
        if self.duration_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "run.duration_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl ScratchSection {
    /// Validates the scratch root.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root {
            if root.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("scratch.root must not be empty".to_string()));
            }
            validate_path(root)?;
        }
        Ok(())
    }
}

impl PrivilegeSection {
    /// Validates the account name.
    fn validate(&self) -> Result<(), ConfigError> {
        let Some(user) = &self.unprivileged_user else {
            return Ok(());
        };
        if user.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "privilege.unprivileged_user must not be empty".to_string(),
            ));
        }
        if user.len() > MAX_USER_NAME_LENGTH {
            return Err(ConfigError::Invalid(
                "privilege.unprivileged_user is too long".to_string(),
            ));
        }
        if user.chars().any(|ch| ch == '\0' || ch == ':' || ch == '/' || ch.is_whitespace()) {
            return Err(ConfigError::Invalid(
                "privilege.unprivileged_user contains invalid characters".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Examples
// ============================================================================

/// Returns a canonical example `syscheck.toml`.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[run]
iterations = 1
delay_ms = 0
# duration_secs = 60

[scratch]
# root = "/var/tmp/syscheck"
keep = false

[privilege]
unprivileged_user = "nobody"

[report]
format = "text"
errno_log = false
"#,
    )
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
///
/// Returns `None` when only the default name applies and it does not exist.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Some(env_path) =
        read_env_nonempty(HarnessEnv::Config.as_str()).map_err(ConfigError::Invalid)?
    {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default.is_file().then_some(default))
}

/// Validates a path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}
