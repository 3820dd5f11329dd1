// crates/syscheck-harness/src/errno_log.rs
// ============================================================================
// Module: Errno Log
// Description: Counts errnos observed during a run against the expected set.
// Purpose: Flag error codes a program never declared it could see.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each program declares the errnos it expects its calls to produce. Every
//! captured errno is counted here; at exit the driver can emit one summary
//! line per errno marked expected or unexpected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::errno::Errno;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One errno summary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrnoCount {
    /// Observed errno.
    pub errno: Errno,
    /// Number of times it was observed.
    pub count: u64,
    /// Whether the program declared it as expected.
    pub expected: bool,
}

/// Occurrence counter for errnos captured during a run.
#[derive(Debug, Clone, Default)]
pub struct ErrnoLog {
    /// Errnos the program declared.
    expected: BTreeSet<Errno>,
    /// Observed counts keyed by errno.
    counts: BTreeMap<Errno, u64>,
}

impl ErrnoLog {
    /// Creates a log with the declared errno set.
    #[must_use]
    pub fn new(expected: &[Errno]) -> Self {
        Self {
            expected: expected.iter().copied().collect(),
            counts: BTreeMap::new(),
        }
    }

    /// Counts one occurrence.
    pub fn record(&mut self, errno: Errno) {
        let slot = self.counts.entry(errno).or_insert(0);
        *slot = slot.saturating_add(1);
    }

    /// Returns how often an errno was observed.
    #[must_use]
    pub fn count(&self, errno: Errno) -> u64 {
        self.counts.get(&errno).copied().unwrap_or(0)
    }

    /// Returns whether the errno was declared.
    #[must_use]
    pub fn is_expected(&self, errno: Errno) -> bool {
        self.expected.contains(&errno)
    }

    /// Returns entries ordered by errno value.
    #[must_use]
    pub fn entries(&self) -> Vec<ErrnoCount> {
        self.counts
            .iter()
            .map(|(errno, count)| ErrnoCount {
                errno: *errno,
                count: *count,
                expected: self.is_expected(*errno),
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
