// crates/syscheck-harness/src/report/text.rs
// ============================================================================
// Module: Text Reporter
// Description: LTP-style human-readable report lines.
// Purpose: Print `<tcid> <n> <VERDICT> : <message>` lines.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Case lines carry the one-based case number within the iteration. Info and
//! errno lines use case number `0`, matching the convention for messages not
//! tied to a sub-case.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use crate::report::ReportError;
use crate::report::ReportEvent;
use crate::report::Reporter;
use crate::verdict::Verdict;

// ============================================================================
// SECTION: Text Reporter
// ============================================================================

/// Writes human-readable report lines.
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    /// Output writer.
    writer: W,
}

impl<W: Write> TextReporter<W> {
    /// Creates a text reporter over `writer`.
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

impl<W: Write> Reporter for TextReporter<W> {
    fn emit(&mut self, event: &ReportEvent<'_>) -> Result<(), ReportError> {
        match event {
            ReportEvent::Case(record) => writeln!(
                self.writer,
                "{} {} {} : {}",
                record.tcid, record.case, record.verdict, record.message
            )?,
            ReportEvent::Info {
                tcid,
                message,
            } => writeln!(self.writer, "{tcid} 0 INFO : {message}")?,
            ReportEvent::Errno {
                tcid,
                entry,
            } => {
                let marker = if entry.expected { "expected" } else { "unexpected" };
                writeln!(
                    self.writer,
                    "{tcid} 0 INFO : errno {}({}) seen {} time(s), {marker}",
                    entry.errno.name(),
                    entry.errno.raw(),
                    entry.count
                )?;
            }
            ReportEvent::Summary(summary) => {
                let counts = Verdict::ALL
                    .iter()
                    .map(|verdict| format!("{}={}", verdict.as_str(), summary.tally.count(*verdict)))
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(
                    self.writer,
                    "{} summary: {counts} iterations={} exit={}",
                    summary.tcid, summary.iterations, summary.exit_code
                )?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
