// crates/syscheck-cases/src/bin/open03.rs
// ============================================================================
// Module: open03 Binary
// Description: Standalone entry point for the open03 program.
// Purpose: Run open03 with the shared harness flags and exit status.
// Dependencies: syscheck-cases, syscheck-harness
// ============================================================================

//! ## Overview
//! Runs `open03`; see [`syscheck_cases::open::Open03`].

use std::process::ExitCode;

use syscheck_cases::open::Open03;
use syscheck_harness::cli::program_main;

fn main() -> ExitCode {
    program_main(&Open03)
}
