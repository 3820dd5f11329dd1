// crates/syscheck-harness/src/cli/cli_tests.rs
// ============================================================================
// Module: Program Entry Point Unit Tests
// Description: Unit coverage for flag parsing and in-process execution.
// Purpose: Ensure binaries share one flag surface and exit-code mapping.
// Dependencies: clap, tempfile
// ============================================================================

//! ## Overview
//! Unit coverage for flag parsing and in-process execution.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use super::execute;
use super::harness_failure_code;
use super::parse_args;
use crate::driver::Iteration;
use crate::driver::ProgramInfo;
use crate::driver::SetupEnv;
use crate::driver::TestProgram;
use crate::driver::TestRun;
use crate::error::Broken;
use crate::options::RunArgs;
use crate::report::ReportFormat;
use crate::test_env::EnvGuard;
use crate::test_env::env_lock;
use crate::verdict::ExitConvention;

const INFO: ProgramInfo = ProgramInfo {
    tcid: "scratch01",
    origin: "ltp",
    description: "creates a scratch dir and fails once",
    convention: ExitConvention::Ltp,
    expected_errnos: &[],
    looping: true,
};

struct ScratchProgram;

struct ScratchRun {
    scratch: crate::fixture::ScratchDir,
}

impl TestProgram for ScratchProgram {
    fn info(&self) -> ProgramInfo {
        INFO
    }

    fn setup(&self, env: &SetupEnv) -> Result<Box<dyn TestRun>, Broken> {
        Ok(Box::new(ScratchRun {
            scratch: env.scratch_dir(INFO.tcid)?,
        }))
    }
}

impl TestRun for ScratchRun {
    fn iterate(&mut self, iteration: &mut Iteration<'_>) -> Result<(), Broken> {
        if self.scratch.path().is_dir() {
            iteration.pass("scratch exists");
        }
        iteration.fail("scripted failure");
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), Broken> {
        self.scratch.close()
    }
}

#[test]
fn parse_args_accepts_program_flags() {
    let args = parse_args(&INFO, ["scratch01", "-i", "2", "--format", "json"]).expect("parse");
    assert_eq!(args.iterations, Some(2));
    assert_eq!(args.format, Some(ReportFormat::Json));
}

#[test]
fn parse_args_rejects_unknown_flags() {
    let err = parse_args(&INFO, ["scratch01", "--bogus"]).expect_err("unknown flag");
    assert!(err.use_stderr());
    let help = parse_args(&INFO, ["scratch01", "--help"]).expect_err("help exits");
    assert!(!help.use_stderr());
}

#[test]
fn execute_reports_and_returns_ltp_bits() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();
    let root = tempfile::tempdir().expect("root");

    let args = RunArgs {
        iterations: Some(2),
        scratch_root: Some(root.path().to_path_buf()),
        ..RunArgs::default()
    };
    let mut out = Vec::new();
    let code = execute(&ScratchProgram, &args, &mut out).expect("execute");
    assert_eq!(code, 1);

    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(text.lines().filter(|line| line.starts_with("scratch01 1 PASS")).count(), 2);
    assert_eq!(text.lines().filter(|line| line.starts_with("scratch01 2 FAIL")).count(), 2);
    assert_eq!(std::fs::read_dir(root.path()).expect("read").count(), 0);
}

#[test]
fn execute_rejects_missing_config() {
    let _lock = env_lock();
    let _guard = EnvGuard::capture();
    let root = tempfile::tempdir().expect("root");

    let args = RunArgs {
        config: Some(root.path().join("absent.toml")),
        ..RunArgs::default()
    };
    let mut out = Vec::new();
    assert!(execute(&ScratchProgram, &args, &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn harness_failures_use_broken_code() {
    assert_eq!(harness_failure_code(ExitConvention::Ltp), 2);
    assert_eq!(harness_failure_code(ExitConvention::OpenPosix), 2);
}
