// crates/syscheck-cases/src/bin/mq_timedsend_7_1.rs
// ============================================================================
// Module: mq_timedsend_7_1 Binary
// Description: Standalone entry point for the mq_timedsend_7_1 program.
// Purpose: Run mq_timedsend_7_1 with the shared harness flags and exit status.
// Dependencies: syscheck-cases, syscheck-harness
// ============================================================================

//! ## Overview
//! Runs `mq_timedsend_7_1` once; loop flags are accepted and ignored.

use std::process::ExitCode;

use syscheck_cases::mq_timedsend::MqTimedsend7_1;
use syscheck_harness::cli::program_main;

fn main() -> ExitCode {
    program_main(&MqTimedsend7_1)
}
