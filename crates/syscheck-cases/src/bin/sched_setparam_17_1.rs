// crates/syscheck-cases/src/bin/sched_setparam_17_1.rs
// ============================================================================
// Module: sched_setparam_17_1 Binary
// Description: Standalone entry point for the sched_setparam_17_1 program.
// Purpose: Run sched_setparam_17_1 with the shared harness flags and exit status.
// Dependencies: syscheck-cases, syscheck-harness
// ============================================================================

//! ## Overview
//! Runs `sched_setparam_17_1`, which always reports UNTESTED.

use std::process::ExitCode;

use syscheck_cases::sched_setparam::SchedSetparam17_1;
use syscheck_harness::cli::program_main;

fn main() -> ExitCode {
    program_main(&SchedSetparam17_1)
}
