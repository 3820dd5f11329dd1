// crates/syscheck-harness/src/verdict.rs
// ============================================================================
// Module: Verdicts
// Description: Categorical outcomes and exit status conventions.
// Purpose: Classify each sub-case result and fold them into an exit code.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Verdict`] is produced once per sub-case per loop iteration. The
//! [`Tally`] accumulates them and an [`ExitConvention`] turns the tally into
//! the process exit status.
//!
//! Two conventions exist because the programs come from two suites: the
//! LTP-style programs OR a bit per verdict kind into the status, the Open
//! POSIX-style programs exit with the single worst verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Categorical outcome of a single sub-case evaluation.
///
/// # Invariants
/// - Variants are stable for report labels and serialized summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Observed behavior matched the expectation.
    Pass,
    /// Observed behavior contradicted the expectation.
    Fail,
    /// Preconditions could not be established; the run was aborted.
    Broken,
    /// An ancillary failure prevented a clear verdict.
    Unresolved,
    /// The host does not provide the facility under test.
    Unsupported,
    /// The assertion is documented but deliberately not checked.
    Untested,
}

impl Verdict {
    /// Every verdict in report order.
    pub const ALL: [Self; 6] = [
        Self::Pass,
        Self::Fail,
        Self::Broken,
        Self::Unresolved,
        Self::Unsupported,
        Self::Untested,
    ];

    /// Returns the stable lowercase name used in JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Broken => "broken",
            Self::Unresolved => "unresolved",
            Self::Unsupported => "unsupported",
            Self::Untested => "untested",
        }
    }

    /// Returns the uppercase label used in text report lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Broken => "BROKEN",
            Self::Unresolved => "UNRESOLVED",
            Self::Unsupported => "UNSUPPORTED",
            Self::Untested => "UNTESTED",
        }
    }

    /// Ranks verdicts so the worst one of a run can be selected.
    ///
    /// Higher is worse; `Pass` ranks lowest.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Pass => 0,
            Self::Untested => 1,
            Self::Unsupported => 2,
            Self::Unresolved => 3,
            Self::Broken => 4,
            Self::Fail => 5,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Tally
// ============================================================================

/// Per-verdict counters for a program run or a whole suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Number of PASS verdicts.
    pub pass: u64,
    /// Number of FAIL verdicts.
    pub fail: u64,
    /// Number of BROKEN verdicts.
    pub broken: u64,
    /// Number of UNRESOLVED verdicts.
    pub unresolved: u64,
    /// Number of UNSUPPORTED verdicts.
    pub unsupported: u64,
    /// Number of UNTESTED verdicts.
    pub untested: u64,
}

impl Tally {
    /// Counts one verdict.
    pub const fn record(&mut self, verdict: Verdict) {
        let slot = self.slot_mut(verdict);
        *slot = slot.saturating_add(1);
    }

    /// Returns the count recorded for a verdict.
    #[must_use]
    pub const fn count(&self, verdict: Verdict) -> u64 {
        match verdict {
            Verdict::Pass => self.pass,
            Verdict::Fail => self.fail,
            Verdict::Broken => self.broken,
            Verdict::Unresolved => self.unresolved,
            Verdict::Unsupported => self.unsupported,
            Verdict::Untested => self.untested,
        }
    }

    /// Returns the total number of verdicts recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        Verdict::ALL.iter().map(|verdict| self.count(*verdict)).sum()
    }

    /// Returns the most severe verdict recorded, if any.
    #[must_use]
    pub fn worst(&self) -> Option<Verdict> {
        Verdict::ALL
            .into_iter()
            .filter(|verdict| self.count(*verdict) > 0)
            .max_by_key(|verdict| verdict.severity())
    }

    /// Adds another tally into this one.
    pub fn merge(&mut self, other: &Self) {
        for verdict in Verdict::ALL {
            let slot = self.slot_mut(verdict);
            *slot = slot.saturating_add(other.count(verdict));
        }
    }

    /// Returns the counter backing a verdict.
    const fn slot_mut(&mut self, verdict: Verdict) -> &mut u64 {
        match verdict {
            Verdict::Pass => &mut self.pass,
            Verdict::Fail => &mut self.fail,
            Verdict::Broken => &mut self.broken,
            Verdict::Unresolved => &mut self.unresolved,
            Verdict::Unsupported => &mut self.unsupported,
            Verdict::Untested => &mut self.untested,
        }
    }
}

// ============================================================================
// SECTION: Exit Conventions
// ============================================================================

/// Exit status convention a program reports under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitConvention {
    /// Bitmask of every verdict kind seen (LTP `tst_exit`).
    Ltp,
    /// Single worst verdict (Open POSIX `PTS_*` codes).
    OpenPosix,
}

impl ExitConvention {
    /// Returns the exit contribution of a single verdict.
    #[must_use]
    pub const fn code_for(self, verdict: Verdict) -> u8 {
        match self {
            Self::Ltp => match verdict {
                Verdict::Pass => 0,
                Verdict::Fail => 1,
                Verdict::Broken => 2,
                Verdict::Unresolved => 4,
                Verdict::Unsupported | Verdict::Untested => 32,
            },
            Self::OpenPosix => match verdict {
                Verdict::Pass => 0,
                Verdict::Fail => 1,
                Verdict::Broken | Verdict::Unresolved => 2,
                Verdict::Unsupported => 4,
                Verdict::Untested => 5,
            },
        }
    }

    /// Folds a tally into the process exit code.
    ///
    /// An empty tally exits 0 under both conventions.
    #[must_use]
    pub fn exit_code(self, tally: &Tally) -> u8 {
        match self {
            Self::Ltp => Verdict::ALL
                .into_iter()
                .filter(|verdict| tally.count(*verdict) > 0)
                .fold(0, |acc, verdict| acc | self.code_for(verdict)),
            Self::OpenPosix => tally.worst().map_or(0, |verdict| self.code_for(verdict)),
        }
    }

    /// Returns the stable name of the convention.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltp => "ltp",
            Self::OpenPosix => "open_posix",
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
