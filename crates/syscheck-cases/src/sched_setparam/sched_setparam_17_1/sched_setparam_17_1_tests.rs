// crates/syscheck-cases/src/sched_setparam/sched_setparam_17_1/sched_setparam_17_1_tests.rs
// ============================================================================
// Module: sched_setparam 17-1 Unit Tests
// Description: Unit coverage for the untested assertion program.
// Purpose: Ensure the verdict, message, and exit code are stable.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! Unit coverage for the untested assertion program.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use syscheck_harness::Verdict;
use syscheck_harness::driver::run_program;
use syscheck_harness::options::LoopPolicy;
use syscheck_harness::options::RunSettings;
use syscheck_harness::report::TextReporter;

use super::SchedSetparam17_1;
use super::UNTESTED_MESSAGE;

#[test]
fn reports_untested_once_with_exit_five() {
    let settings = RunSettings {
        loop_policy: LoopPolicy::Forever,
        ..RunSettings::default()
    };
    let mut reporter = TextReporter::new(Vec::new());
    let summary = run_program(&SchedSetparam17_1, &settings, &mut reporter).expect("run");

    assert_eq!(summary.iterations, 1);
    assert_eq!(summary.tally.untested, 1);
    assert_eq!(summary.tally.total(), 1);
    assert_eq!(summary.records[0].verdict, Verdict::Untested);
    assert_eq!(summary.exit_code, 5);

    let out = String::from_utf8(reporter.into_inner()).expect("utf8");
    let first = out.lines().next().expect("line");
    assert_eq!(first, format!("sched_setparam_17_1 1 UNTESTED : {UNTESTED_MESSAGE}"));
}

#[test]
fn message_is_the_documented_sentence() {
    assert!(UNTESTED_MESSAGE.starts_with("Will not test that sched_setparam have no effect"));
    assert!(UNTESTED_MESSAGE.ends_with("system scheduling contention scope."));
    assert!(!UNTESTED_MESSAGE.contains("  "));
}
