// crates/syscheck-cli/tests/cli.rs
// ============================================================================
// Module: Suite Runner Binary Tests
// Description: Spawns the `syscheck` binary and checks its exit status.
// Purpose: Exercise argument parsing and stderr reporting end to end.
// ============================================================================

//! ## Overview
//! Runs the built `syscheck` binary in a scratch working directory with the
//! harness environment variables removed.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::Path;
use std::process::Command;

const HARNESS_ENV: [&str; 4] =
    ["SYSCHECK_CONFIG", "SYSCHECK_SCRATCH_ROOT", "SYSCHECK_ITERATIONS", "SYSCHECK_KEEP_SCRATCH"];

fn syscheck(cwd: &Path, args: &[&str]) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_syscheck"));
    command.current_dir(cwd).args(args);
    for key in HARNESS_ENV {
        command.env_remove(key);
    }
    command.output().expect("spawn syscheck")
}

#[test]
fn list_exits_zero() {
    let cwd = tempfile::tempdir().expect("cwd");
    let output = syscheck(cwd.path(), &["list"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.lines().count(), 4, "{stdout}");
}

#[test]
fn run_propagates_program_exit_code() {
    let cwd = tempfile::tempdir().expect("cwd");
    let output = syscheck(cwd.path(), &["run", "sched_setparam_17_1", "open03"]);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(output.status.code(), Some(5), "{stdout}");
    assert!(stdout.contains("sched_setparam_17_1 1 UNTESTED : "), "{stdout}");
    assert!(stdout.contains("open03 1 PASS : "), "{stdout}");
}

#[test]
fn unknown_tcid_exits_two_with_message() {
    let cwd = tempfile::tempdir().expect("cwd");
    let output = syscheck(cwd.path(), &["run", "nosuch01"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert_eq!(stderr.trim_end(), "unknown test program: nosuch01");
}

#[test]
fn config_validate_reads_working_directory_file() {
    let cwd = tempfile::tempdir().expect("cwd");
    std::fs::write(cwd.path().join("syscheck.toml"), "[report]\nformat = \"xml\"\n")
        .expect("write");
    let output = syscheck(cwd.path(), &["config", "validate"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.starts_with("config invalid: "), "{stderr}");
}

#[test]
fn help_and_version_succeed() {
    let cwd = tempfile::tempdir().expect("cwd");
    let help = syscheck(cwd.path(), &["--help"]);
    assert_eq!(help.status.code(), Some(0));
    assert!(String::from_utf8(help.stdout).expect("utf8").contains("Usage: syscheck"));
    let version = syscheck(cwd.path(), &["--version"]);
    assert_eq!(version.status.code(), Some(0));
}
