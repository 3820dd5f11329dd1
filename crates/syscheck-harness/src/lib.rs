// crates/syscheck-harness/src/lib.rs
// ============================================================================
// Module: syscheck Harness Library
// Description: Shared execution contract for syscall conformance programs.
// Purpose: Provide verdicts, errno capture, fixtures, reporting, and the driver.
// Dependencies: clap, libc, serde, serde_jcs, serde_json, tempfile, thiserror, toml
// ============================================================================

//! ## Overview
//! `syscheck-harness` hosts everything a conformance program shares with its
//! siblings: the categorical [`Verdict`] model, typed [`Errno`] capture, the
//! expected-outcome table evaluator, scratch fixtures, the loop driver, and
//! result reporting. Programs implement [`TestProgram`] and hand themselves to
//! [`cli::program_main`] or [`driver::run_program`].
//!
//! All direct libc calls live in [`sys`]; every other module is safe code.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod driver;
pub mod errno;
pub mod errno_log;
pub mod error;
pub mod fixture;
pub mod options;
pub mod report;
pub mod sys;
pub mod table;
pub mod verdict;

#[cfg(test)]
mod test_env;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use driver::Iteration;
pub use driver::ProgramInfo;
pub use driver::SetupEnv;
pub use driver::TestProgram;
pub use driver::TestRun;
pub use errno::Errno;
pub use error::Broken;
pub use error::HarnessError;
pub use report::CaseRecord;
pub use report::RunSummary;
pub use table::Expectation;
pub use table::SubCase;
pub use verdict::ExitConvention;
pub use verdict::Tally;
pub use verdict::Verdict;
