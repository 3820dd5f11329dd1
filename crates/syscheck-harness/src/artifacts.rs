// crates/syscheck-harness/src/artifacts.rs
// ============================================================================
// Module: Run Artifacts
// Description: Deterministic summary files for a finished run.
// Purpose: Write summary.json (canonical JSON) and summary.md to a directory.
// Dependencies: serde, serde_jcs
// ============================================================================

//! ## Overview
//! `summary.json` is serialized with JCS (RFC 8785) so two runs with the same
//! verdicts produce byte-identical files apart from timing fields.
//! `summary.md` is a short human digest of the same data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::report::ReportError;
use crate::report::RunSummary;
use crate::verdict::Verdict;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Canonical JSON summary file name.
pub const SUMMARY_JSON: &str = "summary.json";
/// Markdown summary file name.
pub const SUMMARY_MD: &str = "summary.md";
/// Most failing records listed in the markdown digest.
const MAX_MARKDOWN_FINDINGS: usize = 50;

// ============================================================================
// SECTION: Run Artifacts
// ============================================================================

/// Artifact directory for one run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Directory receiving the files.
    root: PathBuf,
}

impl RunArtifacts {
    /// Creates the directory (and parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the directory cannot be created.
    pub fn create(root: &Path) -> Result<Self, ReportError> {
        fs::create_dir_all(root)
            .map_err(|err| ReportError::Io(format!("{}: {err}", root.display())))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf, ReportError> {
        let path = self.root.join(name);
        let bytes =
            serde_jcs::to_vec(value).map_err(|err| ReportError::Serialize(err.to_string()))?;
        fs::write(&path, bytes)
            .map_err(|err| ReportError::Io(format!("{}: {err}", path.display())))?;
        Ok(path)
    }

    /// Writes a UTF-8 text artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> Result<PathBuf, ReportError> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())
            .map_err(|err| ReportError::Io(format!("{}: {err}", path.display())))?;
        Ok(path)
    }

    /// Writes `summary.json` and `summary.md` for a run.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when either file cannot be written.
    pub fn write_summary(&self, summary: &RunSummary) -> Result<(), ReportError> {
        self.write_json(SUMMARY_JSON, summary)?;
        self.write_text(SUMMARY_MD, &summary_markdown(summary))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders the markdown digest.
fn summary_markdown(summary: &RunSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} Summary\n", summary.tcid);
    out.push_str("## Status\n\n");
    let _ = writeln!(out, "- Convention: {}", summary.convention.as_str());
    let _ = writeln!(out, "- Exit code: {}", summary.exit_code);
    let _ = writeln!(out, "- Iterations: {}", summary.iterations);
    let _ = writeln!(out, "- Duration (ms): {}", summary.duration_ms);
    out.push_str("\n## Verdicts\n\n");
    for verdict in Verdict::ALL {
        let _ = writeln!(out, "- {}: {}", verdict.label(), summary.tally.count(verdict));
    }
    out.push_str("\n## Findings\n\n");
    let findings: Vec<_> =
        summary.records.iter().filter(|record| record.verdict != Verdict::Pass).collect();
    if findings.is_empty() {
        out.push_str("- None\n");
    } else {
        for record in findings.iter().take(MAX_MARKDOWN_FINDINGS) {
            let _ = writeln!(
                out,
                "- iteration {} case {}: {} {}",
                record.iteration, record.case, record.verdict, record.message
            );
        }
        if findings.len() > MAX_MARKDOWN_FINDINGS {
            let _ = writeln!(out, "- ... {} more", findings.len() - MAX_MARKDOWN_FINDINGS);
        }
    }
    if summary.records_truncated {
        out.push_str("\nOlder records were dropped to bound memory.\n");
    }
    out.push_str("\n## Errnos\n\n");
    if summary.errnos.is_empty() {
        out.push_str("- None\n");
    } else {
        for entry in &summary.errnos {
            let marker = if entry.expected { "expected" } else { "unexpected" };
            let _ = writeln!(out, "- {} x{} ({marker})", entry.errno.name(), entry.count);
        }
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod artifacts_tests;
