// crates/syscheck-cases/src/open/open03/open03_tests.rs
// ============================================================================
// Module: open03 Unit Tests
// Description: In-process runs of the open03 program.
// Purpose: Ensure repeated create/remove passes and leaves nothing behind.
// Dependencies: syscheck-harness, tempfile
// ============================================================================

//! ## Overview
//! In-process runs of the open03 program.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::use_debug,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::fs;
use std::path::Path;

use syscheck_harness::RunSummary;
use syscheck_harness::Verdict;
use syscheck_harness::driver::run_program;
use syscheck_harness::options::LoopPolicy;
use syscheck_harness::options::RunSettings;
use syscheck_harness::report::TextReporter;

use super::Open03;

fn run(root: &Path, iterations: u64, functional: bool) -> (RunSummary, String) {
    let settings = RunSettings {
        loop_policy: LoopPolicy::from_count(iterations),
        functional,
        scratch_root: root.to_path_buf(),
        ..RunSettings::default()
    };
    let mut reporter = TextReporter::new(Vec::new());
    let summary = run_program(&Open03, &settings, &mut reporter).expect("run");
    (summary, String::from_utf8(reporter.into_inner()).expect("utf8"))
}

#[test]
fn every_iteration_passes() {
    let root = tempfile::tempdir().expect("root");
    let (summary, out) = run(root.path(), 3, true);

    assert_eq!(summary.exit_code, 0, "{out}");
    assert_eq!(summary.iterations, 3);
    assert_eq!(summary.tally.pass, 3);
    assert!(summary.records.iter().all(|record| record.verdict == Verdict::Pass));
    let first = &summary.records[0].message;
    assert!(first.contains("tfile_"), "{first}");
    assert!(first.contains("O_RDWR|O_CREAT,0700) returned "), "{first}");
    assert_eq!(out.lines().filter(|line| line.starts_with("open03 1 PASS : ")).count(), 3);
}

#[test]
fn no_functional_suppresses_pass_lines() {
    let root = tempfile::tempdir().expect("root");
    let (summary, _) = run(root.path(), 2, false);
    assert_eq!(summary.exit_code, 0);
    assert_eq!(summary.iterations, 2);
    assert_eq!(summary.tally.total(), 0);
}

#[test]
fn scratch_is_removed_after_run() {
    let root = tempfile::tempdir().expect("root");
    run(root.path(), 1, true);
    assert_eq!(fs::read_dir(root.path()).expect("read").count(), 0);
}

#[test]
fn unusable_scratch_root_is_broken() {
    let root = tempfile::tempdir().expect("root");
    let file_root = root.path().join("plain-file");
    fs::write(&file_root, b"").expect("write");
    let (summary, _) = run(&file_root, 1, true);
    assert_eq!(summary.tally.broken, 1);
    assert_eq!(summary.exit_code, 2);
    assert_eq!(summary.iterations, 0);
}
