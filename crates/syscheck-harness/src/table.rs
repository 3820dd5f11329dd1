// crates/syscheck-harness/src/table.rs
// ============================================================================
// Module: Expected-Outcome Tables
// Description: Sub-case rows and the rule that turns an outcome into a verdict.
// Purpose: Keep every table-driven program on one classification rule.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A program with several sub-cases declares them as a static slice of
//! [`SubCase`] rows, iterated in order each loop. After each call the captured
//! [`SyscallOutcome`] is classified against the row's [`Expectation`]:
//!
//! - success where a failure was expected is FAIL,
//! - the expected errno is PASS,
//! - any other errno is FAIL and names the expected value.
//!
//! Inputs that only exist at runtime (a per-pid file name, an unmapped
//! address) stay symbolic in `I` and are resolved by the program against its
//! fixture.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::errno::Errno;
use crate::sys::SyscallOutcome;
use crate::verdict::Verdict;

// ============================================================================
// SECTION: Types
// ============================================================================

/// What a call is expected to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "errno", rename_all = "snake_case")]
pub enum Expectation {
    /// The call returns without error.
    Success,
    /// The call fails with exactly this errno.
    Failure(Errno),
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure(errno) => f.write_str(errno.name()),
        }
    }
}

/// One row of an expected-outcome table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCase<I> {
    /// Short label used in info lines.
    pub label: &'static str,
    /// Program-specific input.
    pub input: I,
    /// Expected outcome.
    pub expect: Expectation,
}

/// Verdict and message for one classified outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Categorical result.
    pub verdict: Verdict,
    /// Report line body.
    pub message: String,
    /// Errno observed, for the errno log.
    pub errno: Option<Errno>,
}

impl Evaluation {
    /// Builds an evaluation with no errno attached.
    #[must_use]
    pub fn new(verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            verdict,
            message: message.into(),
            errno: None,
        }
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies `outcome` against `expect`.
///
/// `call` describes the invocation (for example
/// `open(/tmp/x, O_RDWR|O_CREAT,0700)`) and is only used for rows that expect
/// success; failure rows use the fixed errno messages.
#[must_use]
pub fn evaluate(outcome: &SyscallOutcome, expect: Expectation, call: &str) -> Evaluation {
    match (expect, outcome.errno) {
        (Expectation::Failure(_), None) => {
            Evaluation::new(Verdict::Fail, "call succeeded unexpectedly")
        }
        (Expectation::Failure(wanted), Some(observed)) if wanted == observed => Evaluation {
            verdict: Verdict::Pass,
            message: format!(
                "expected failure - errno = {} : {}",
                observed.raw(),
                observed.description()
            ),
            errno: Some(observed),
        },
        (Expectation::Failure(wanted), Some(observed)) => Evaluation {
            verdict: Verdict::Fail,
            message: format!(
                "unexpected error - {} : {} - expected {}",
                observed.raw(),
                observed.description(),
                wanted.raw()
            ),
            errno: Some(observed),
        },
        (Expectation::Success, None) => {
            Evaluation::new(Verdict::Pass, format!("{call} returned {}", outcome.ret))
        }
        (Expectation::Success, Some(observed)) => Evaluation {
            verdict: Verdict::Fail,
            message: format!("{call} failed: errno={observed}"),
            errno: Some(observed),
        },
    }
}

/// Returns the distinct errnos a table expects, in row order.
#[must_use]
pub fn expected_errnos<I>(cases: &[SubCase<I>]) -> Vec<Errno> {
    let mut errnos = Vec::new();
    for case in cases {
        if let Expectation::Failure(errno) = case.expect
            && !errnos.contains(&errno)
        {
            errnos.push(errno);
        }
    }
    errnos
}

// ============================================================================
// SECTION: Tests
// ============================================================================
