// crates/syscheck-harness/src/artifacts/artifacts_tests.rs
// ============================================================================
// Module: Run Artifact Unit Tests
// Description: Unit coverage for summary.json and summary.md output.
// Purpose: Ensure artifacts are canonical and list every non-PASS finding.
// Dependencies: serde_json, tempfile
// ============================================================================

//! ## Overview
//! Unit coverage for summary.json and summary.md output.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::fs;

use super::RunArtifacts;
use super::SUMMARY_JSON;
use super::SUMMARY_MD;
use crate::errno::Errno;
use crate::errno_log::ErrnoCount;
use crate::report::CaseRecord;
use crate::report::RunSummary;
use crate::verdict::ExitConvention;
use crate::verdict::Tally;
use crate::verdict::Verdict;

fn summary() -> RunSummary {
    let mut tally = Tally::default();
    tally.record(Verdict::Pass);
    tally.record(Verdict::Fail);
    RunSummary {
        tcid: "open08".to_string(),
        convention: ExitConvention::Ltp,
        tally,
        exit_code: 1,
        iterations: 1,
        duration_ms: 12,
        records: vec![
            CaseRecord {
                tcid: "open08".to_string(),
                iteration: 0,
                case: 1,
                verdict: Verdict::Pass,
                message: "expected failure".to_string(),
                errno: Some(Errno::EEXIST),
            },
            CaseRecord {
                tcid: "open08".to_string(),
                iteration: 0,
                case: 2,
                verdict: Verdict::Fail,
                message: "call succeeded unexpectedly".to_string(),
                errno: None,
            },
        ],
        records_truncated: false,
        errnos: vec![ErrnoCount {
            errno: Errno::EEXIST,
            count: 1,
            expected: true,
        }],
    }
}

#[test]
fn write_summary_creates_both_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("nested").join("artifacts");
    let artifacts = RunArtifacts::create(&root).expect("create");

    artifacts.write_summary(&summary()).expect("write");

    let json = fs::read_to_string(root.join(SUMMARY_JSON)).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value["tcid"], "open08");
    assert_eq!(value["exit_code"], 1);
    assert_eq!(value["tally"]["fail"], 1);
    assert_eq!(value["records"][0]["errno"], libc::EEXIST);
    assert!(!json.contains('\n'), "canonical json has no whitespace");

    let markdown = fs::read_to_string(root.join(SUMMARY_MD)).expect("md");
    assert!(markdown.starts_with("# open08 Summary"));
    assert!(markdown.contains("- FAIL: 1"));
    assert!(markdown.contains("iteration 0 case 2: FAIL call succeeded unexpectedly"));
    assert!(!markdown.contains("case 1:"));
    assert!(markdown.contains("- EEXIST x1 (expected)"));
}

#[test]
fn canonical_json_is_stable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifacts = RunArtifacts::create(dir.path()).expect("create");
    let first = artifacts.write_json("a.json", &summary()).expect("a");
    let second = artifacts.write_json("b.json", &summary()).expect("b");
    assert_eq!(fs::read(first).expect("read a"), fs::read(second).expect("read b"));
}
