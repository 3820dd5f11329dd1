// crates/syscheck-cases/src/bin/open08.rs
// ============================================================================
// Module: open08 Binary
// Description: Standalone entry point for the open08 program.
// Purpose: Run open08 with the shared harness flags and exit status.
// Dependencies: syscheck-cases, syscheck-harness
// ============================================================================

//! ## Overview
//! Runs `open08`. Must be started as root; it switches to an unprivileged account.

use std::process::ExitCode;

use syscheck_cases::open::Open08;
use syscheck_harness::cli::program_main;

fn main() -> ExitCode {
    program_main(&Open08)
}
