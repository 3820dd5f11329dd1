// crates/syscheck-cases/tests/binaries.rs
// ============================================================================
// Module: Program Binary Tests
// Description: Spawns each program binary and checks output and exit status.
// Purpose: Exercise flag parsing, reporting, and exit conventions end to end.
// ============================================================================

//! ## Overview
//! Each test runs a built program in a fresh working directory with the
//! harness environment cleared, so no stray `syscheck.toml` or override leaks
//! in.

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

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use syscheck_harness::config::HarnessEnv;
use syscheck_harness::sys::process::effective_uid;
use syscheck_harness::sys::process::lookup_user;

/// Builds a command for `bin` with a clean harness environment.
fn program(bin: &str, cwd: &Path) -> Command {
    let mut command = Command::new(bin);
    command.current_dir(cwd);
    for key in HarnessEnv::ALL {
        command.env_remove(key.as_str());
    }
    command
}

fn run(mut command: Command) -> (Output, String) {
    let output = command.output().expect("spawn");
    let stdout = String::from_utf8(output.stdout.clone()).expect("utf8");
    (output, stdout)
}

#[test]
fn open03_passes_every_iteration() {
    let root = tempfile::tempdir().expect("root");
    let mut command = program(env!("CARGO_BIN_EXE_open03"), root.path());
    command.args(["-i", "3"]).env("SYSCHECK_SCRATCH_ROOT", root.path());
    let (output, stdout) = run(command);

    assert_eq!(output.status.code(), Some(0), "{stdout}");
    assert_eq!(stdout.lines().filter(|line| line.starts_with("open03 1 PASS : open(")).count(), 3);
    assert!(stdout.lines().last().expect("summary").contains("pass=3"), "{stdout}");
    assert_eq!(fs::read_dir(root.path()).expect("read").count(), 0);
}

#[test]
fn open03_json_output_and_artifacts() {
    let root = tempfile::tempdir().expect("root");
    let scratch = root.path().join("scratch");
    let artifacts = root.path().join("artifacts");
    fs::create_dir(&scratch).expect("scratch");
    let mut command = program(env!("CARGO_BIN_EXE_open03"), root.path());
    command
        .args(["--format", "json", "--artifacts"])
        .arg(&artifacts)
        .arg("--scratch-root")
        .arg(&scratch);
    let (output, stdout) = run(command);

    assert_eq!(output.status.code(), Some(0), "{stdout}");
    let values: Vec<serde_json::Value> =
        stdout.lines().map(|line| serde_json::from_str(line).expect("json line")).collect();
    assert_eq!(values.first().expect("case")["verdict"], "pass");
    assert_eq!(values.last().expect("summary")["kind"], "summary");

    let summary: serde_json::Value =
        serde_json::from_slice(&fs::read(artifacts.join("summary.json")).expect("summary.json"))
            .expect("parse summary");
    assert_eq!(summary["tcid"], "open03");
    assert_eq!(summary["exit_code"], 0);
    assert!(artifacts.join("summary.md").is_file());
}

#[test]
fn open08_requires_root_or_passes_as_root() {
    let cwd = tempfile::tempdir().expect("cwd");
    let mut command = program(env!("CARGO_BIN_EXE_open08"), cwd.path());
    command.arg("--errno-log");
    let (output, stdout) = run(command);
    let code = output.status.code().expect("exit code");

    if effective_uid() != 0 {
        assert_eq!(code, 2, "{stdout}");
        assert!(stdout.contains("open08 1 BROKEN : Test must be run as root"), "{stdout}");
        return;
    }
    assert_eq!(code & 1, 0, "{stdout}");
    if code == 0 && lookup_user("nobody").expect("getpwnam").is_some() {
        assert_eq!(stdout.lines().filter(|line| line.contains(" PASS : expected failure")).count(), 6);
        assert_eq!(stdout.lines().filter(|line| line.ends_with(", expected")).count(), 6, "{stdout}");
    }
}

#[test]
fn mq_timedsend_runs_once() {
    let cwd = tempfile::tempdir().expect("cwd");
    let mut command = program(env!("CARGO_BIN_EXE_mq_timedsend_7_1"), cwd.path());
    command.args(["-i", "3"]);
    let (output, stdout) = run(command);
    let code = output.status.code().expect("exit code");

    assert!(code == 0 || code == 4, "exit {code}: {stdout}");
    assert_eq!(stdout.lines().filter(|line| line.starts_with("mq_timedsend_7_1 1 ")).count(), 1);
    if code == 0 {
        assert!(stdout.contains("mq_timedsend_7_1 1 PASS : Test PASSED"), "{stdout}");
    }
}

#[test]
fn sched_setparam_reports_untested() {
    let cwd = tempfile::tempdir().expect("cwd");
    let (output, stdout) = run(program(env!("CARGO_BIN_EXE_sched_setparam_17_1"), cwd.path()));

    assert_eq!(output.status.code(), Some(5), "{stdout}");
    assert!(stdout.starts_with("sched_setparam_17_1 1 UNTESTED : Will not test"), "{stdout}");
}

#[test]
fn unknown_flag_exits_with_broken_code() {
    let cwd = tempfile::tempdir().expect("cwd");
    let mut command = program(env!("CARGO_BIN_EXE_sched_setparam_17_1"), cwd.path());
    command.arg("--bogus");
    let output = command.output().expect("spawn");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn invalid_config_is_reported_on_stderr() {
    let cwd = tempfile::tempdir().expect("cwd");
    let config = cwd.path().join("syscheck.toml");
    fs::write(&config, "[run]\nduration_secs = 0\n").expect("write");
    let output = program(env!("CARGO_BIN_EXE_open03"), cwd.path()).output().expect("spawn");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.starts_with("open03: "), "{stderr}");
}
