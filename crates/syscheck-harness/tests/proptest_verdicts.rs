//! Verdict classification property-based tests.
//!
//! ## Purpose
//! Randomized checks that the expected-outcome rule and the exit conventions
//! hold for every errno and every mix of verdicts, not just the values the
//! programs happen to use.
//!
//! ## What is covered
//! - A failure row passes exactly when the observed errno equals the expected one.
//! - Unexpected success never passes.
//! - LTP exit codes are the OR of per-verdict bits; PASS-only runs exit 0.
//! - Open POSIX exit codes equal the code of the most severe verdict.
// crates/syscheck-harness/tests/proptest_verdicts.rs
// ============================================================================
// Module: Verdict Property-Based Tests
// Description: Randomized coverage for classification and exit mapping.
// Purpose: Ensure verdict rules hold across the whole input space.
// ============================================================================

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
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use syscheck_harness::Errno;
use syscheck_harness::ExitConvention;
use syscheck_harness::Expectation;
use syscheck_harness::Tally;
use syscheck_harness::Verdict;
use syscheck_harness::sys::SyscallOutcome;
use syscheck_harness::table::evaluate;

fn verdict_strategy() -> impl Strategy<Value = Verdict> {
    prop::sample::select(Verdict::ALL.to_vec())
}

proptest! {
    #[test]
    fn failure_rows_pass_only_on_matching_errno(observed in 1_i32..134, wanted in 1_i32..134) {
        let eval = evaluate(
            &SyscallOutcome::failure(Errno::from_raw(observed)),
            Expectation::Failure(Errno::from_raw(wanted)),
            "call",
        );
        if observed == wanted {
            prop_assert_eq!(eval.verdict, Verdict::Pass);
        } else {
            prop_assert_eq!(eval.verdict, Verdict::Fail);
            let expected_suffix = format!("expected {wanted}");
            prop_assert!(eval.message.ends_with(&expected_suffix));
        }
        prop_assert_eq!(eval.errno, Some(Errno::from_raw(observed)));
    }

    #[test]
    fn unexpected_success_never_passes(ret in 0_i64..1024, wanted in 1_i32..134) {
        let eval = evaluate(
            &SyscallOutcome::success(ret),
            Expectation::Failure(Errno::from_raw(wanted)),
            "call",
        );
        prop_assert_eq!(eval.verdict, Verdict::Fail);
        prop_assert_eq!(eval.errno, None);
    }

    #[test]
    fn ltp_exit_code_is_or_of_bits(verdicts in prop::collection::vec(verdict_strategy(), 0..32)) {
        let mut tally = Tally::default();
        let mut expected = 0_u8;
        for verdict in &verdicts {
            tally.record(*verdict);
            expected |= ExitConvention::Ltp.code_for(*verdict);
        }
        prop_assert_eq!(ExitConvention::Ltp.exit_code(&tally), expected);
        prop_assert_eq!(tally.total(), verdicts.len() as u64);
        if verdicts.iter().all(|verdict| *verdict == Verdict::Pass) {
            prop_assert_eq!(ExitConvention::Ltp.exit_code(&tally), 0);
        }
    }

    #[test]
    fn open_posix_exit_code_tracks_worst(verdicts in prop::collection::vec(verdict_strategy(), 1..32)) {
        let mut tally = Tally::default();
        for verdict in &verdicts {
            tally.record(*verdict);
        }
        let worst = verdicts.iter().copied().max_by_key(|verdict| verdict.severity()).unwrap();
        prop_assert_eq!(tally.worst(), Some(worst));
        prop_assert_eq!(
            ExitConvention::OpenPosix.exit_code(&tally),
            ExitConvention::OpenPosix.code_for(worst)
        );
    }

    #[test]
    fn merge_adds_counts(left in prop::collection::vec(verdict_strategy(), 0..16),
                         right in prop::collection::vec(verdict_strategy(), 0..16)) {
        let mut a = Tally::default();
        let mut b = Tally::default();
        for verdict in &left {
            a.record(*verdict);
        }
        for verdict in &right {
            b.record(*verdict);
        }
        a.merge(&b);
        prop_assert_eq!(a.total(), (left.len() + right.len()) as u64);
    }
}
