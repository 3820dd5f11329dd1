// crates/syscheck-harness/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: File and environment configuration for program runs.
// Purpose: Provide typed, fail-closed settings shared by every program.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Settings come from three layers merged in [`crate::options`]: an optional
//! `syscheck.toml`, `SYSCHECK_*` environment variables, and command-line
//! flags. This module owns the first two. Both fail closed: an oversized or
//! malformed file, an unknown key, or an invalid environment value is an
//! error, never a silent default.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod file;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod env_tests;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::EnvOverrides;
pub use env::HarnessEnv;
pub use env::read_env_strict;
pub use file::ConfigError;
pub use file::HarnessConfig;
pub use file::PrivilegeSection;
pub use file::ReportSection;
pub use file::RunSection;
pub use file::ScratchSection;
pub use file::config_toml_example;
