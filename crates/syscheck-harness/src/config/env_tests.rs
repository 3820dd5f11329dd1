// crates/syscheck-harness/src/config/env_tests.rs
// ============================================================================
// Module: Environment Override Unit Tests
// Description: Unit coverage for strict SYSCHECK_* parsing.
// Purpose: Ensure environment parsing fails closed on invalid inputs.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Unit coverage for strict SYSCHECK_* parsing.
//! Invariants:
//! - Environment parsing rejects invalid or empty values.
//! - Tests restore environment state after each run.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::path::PathBuf;

use super::EnvOverrides;
use super::HarnessConfig;
use super::HarnessEnv;
use crate::test_env::EnvGuard;
use crate::test_env::env_lock;
use crate::test_env::env_mut;

#[test]
fn empty_environment_yields_no_overrides() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    assert_eq!(EnvOverrides::load().expect("load"), EnvOverrides::default());
}

#[test]
fn overrides_parse_each_key() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    env_mut::set_var(HarnessEnv::ScratchRoot.as_str(), "/var/tmp/sc");
    env_mut::set_var(HarnessEnv::Iterations.as_str(), " 7 ");
    env_mut::set_var(HarnessEnv::KeepScratch.as_str(), "TRUE");
    let overrides = EnvOverrides::load().expect("load");
    assert_eq!(overrides.scratch_root, Some(PathBuf::from("/var/tmp/sc")));
    assert_eq!(overrides.iterations, Some(7));
    assert_eq!(overrides.keep_scratch, Some(true));
}

#[test]
fn iterations_reject_invalid_values() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    env_mut::set_var(HarnessEnv::Iterations.as_str(), "-1");
    assert!(EnvOverrides::load().is_err());

    env_mut::set_var(HarnessEnv::Iterations.as_str(), "many");
    assert!(EnvOverrides::load().is_err());

    env_mut::set_var(HarnessEnv::Iterations.as_str(), "   ");
    assert!(EnvOverrides::load().is_err());
}

#[test]
fn keep_scratch_rejects_unknown_literals() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    env_mut::set_var(HarnessEnv::KeepScratch.as_str(), "yes");
    let err = EnvOverrides::load().expect_err("must fail");
    assert!(err.contains("SYSCHECK_KEEP_SCRATCH"));
}

#[test]
fn config_env_path_must_exist() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    env_mut::set_var(HarnessEnv::Config.as_str(), missing.to_str().expect("utf8 path"));
    assert!(HarnessConfig::load(None).is_err());
}

#[test]
fn config_env_path_is_loaded() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[run]\niterations = 4\n").expect("write");
    env_mut::set_var(HarnessEnv::Config.as_str(), path.to_str().expect("utf8 path"));
    let config = HarnessConfig::load(None).expect("load");
    assert_eq!(config.run.iterations, Some(4));
}
