// crates/syscheck-harness/src/report/json.rs
// ============================================================================
// Module: JSON Reporter
// Description: Line-delimited JSON report records.
// Purpose: Emit machine-readable verdicts for downstream tooling.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Each event becomes one JSON object followed by a newline. Every object
//! carries a `kind` field (`case`, `info`, `errno`, `summary`).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use serde_json::json;

use crate::report::ReportError;
use crate::report::ReportEvent;
use crate::report::Reporter;

// ============================================================================
// SECTION: JSON Reporter
// ============================================================================

/// Writes one JSON object per event.
#[derive(Debug)]
pub struct JsonReporter<W: Write> {
    /// Output writer.
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    /// Creates a JSON reporter over `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
        }
    }

    /// Returns the writer, consuming the reporter.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn emit(&mut self, event: &ReportEvent<'_>) -> Result<(), ReportError> {
        let record = match event {
            ReportEvent::Case(record) => json!({
                "kind": "case",
                "tcid": record.tcid,
                "iteration": record.iteration,
                "case": record.case,
                "verdict": record.verdict,
                "errno": record.errno.map(|errno| errno.name()),
                "message": record.message,
            }),
            ReportEvent::Info {
                tcid,
                message,
            } => json!({
                "kind": "info",
                "tcid": tcid,
                "message": message,
            }),
            ReportEvent::Errno {
                tcid,
                entry,
            } => json!({
                "kind": "errno",
                "tcid": tcid,
                "errno": entry.errno.name(),
                "value": entry.errno.raw(),
                "count": entry.count,
                "expected": entry.expected,
            }),
            ReportEvent::Summary(summary) => json!({
                "kind": "summary",
                "tcid": summary.tcid,
                "convention": summary.convention,
                "tally": summary.tally,
                "exit_code": summary.exit_code,
                "iterations": summary.iterations,
                "duration_ms": summary.duration_ms,
            }),
        };
        serde_json::to_writer(&mut self.writer, &record)
            .map_err(|err| ReportError::Serialize(err.to_string()))?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
