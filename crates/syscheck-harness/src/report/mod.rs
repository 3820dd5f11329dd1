// crates/syscheck-harness/src/report/mod.rs
// ============================================================================
// Module: Result Reporting
// Description: Report events, records, and the reporter seam.
// Purpose: Emit one line per verdict in a human or machine format.
// Dependencies: clap, serde, thiserror
// ============================================================================

//! ## Overview
//! The driver turns every verdict, info message, and errno summary into a
//! [`ReportEvent`] and hands it to a [`Reporter`]. Two reporters exist:
//! [`TextReporter`] prints LTP-style lines and [`JsonReporter`] writes one
//! JSON object per event. Both write to an injected writer so tests capture
//! output without touching stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod json;
mod text;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::errno::Errno;
use crate::errno_log::ErrnoCount;
use crate::verdict::ExitConvention;
use crate::verdict::Tally;
use crate::verdict::Verdict;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use json::JsonReporter;
pub use text::TextReporter;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Output format for report lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// LTP-style human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl ReportFormat {
    /// Builds the reporter for this format over `writer`.
    pub fn reporter<'a, W: io::Write + 'a>(self, writer: W) -> Box<dyn Reporter + 'a> {
        match self {
            Self::Text => Box::new(TextReporter::new(writer)),
            Self::Json => Box::new(JsonReporter::new(writer)),
        }
    }
}

/// One verdict produced for a sub-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    /// Program identifier.
    pub tcid: String,
    /// Zero-based loop iteration.
    pub iteration: u64,
    /// One-based case number within the iteration.
    pub case: u32,
    /// Categorical result.
    pub verdict: Verdict,
    /// Report line body.
    pub message: String,
    /// Errno attached to the verdict, if any.
    pub errno: Option<Errno>,
}

/// Final state of one program run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Program identifier.
    pub tcid: String,
    /// Exit convention the program reports under.
    pub convention: ExitConvention,
    /// Verdict counters.
    pub tally: Tally,
    /// Process exit status derived from the tally.
    pub exit_code: u8,
    /// Iterations started.
    pub iterations: u64,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Recorded verdicts, oldest first.
    pub records: Vec<CaseRecord>,
    /// Whether older records were dropped to bound memory.
    pub records_truncated: bool,
    /// Errno occurrence counts.
    pub errnos: Vec<ErrnoCount>,
}

/// An event handed to a reporter.
#[derive(Debug, Clone, Copy)]
pub enum ReportEvent<'a> {
    /// A verdict for one sub-case.
    Case(&'a CaseRecord),
    /// A free-form informational line.
    Info {
        /// Program identifier.
        tcid: &'a str,
        /// Message body.
        message: &'a str,
    },
    /// One errno log entry.
    Errno {
        /// Program identifier.
        tcid: &'a str,
        /// Errno occurrence count.
        entry: &'a ErrnoCount,
    },
    /// The end-of-run summary.
    Summary(&'a RunSummary),
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Sink for report events.
pub trait Reporter {
    /// Writes one event.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when the event cannot be written.
    fn emit(&mut self, event: &ReportEvent<'_>) -> Result<(), ReportError>;
}

/// Reporter and artifact failures.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writer failure.
    #[error("report io error: {0}")]
    Io(String),
    /// Serialization failure.
    #[error("report serialization error: {0}")]
    Serialize(String),
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
