// crates/syscheck-cases/src/lib.rs
// ============================================================================
// Module: syscheck Cases Library
// Description: The conformance programs and their registry.
// Purpose: Expose every program for its own binary and for the suite runner.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! Each program lives in a module named after the interface it checks and
//! also ships as a standalone binary under `src/bin/`. [`programs`] lists
//! them in a stable order for `syscheck list` and `syscheck run`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod mq_timedsend;
pub mod open;
pub mod sched_setparam;

// ============================================================================
// SECTION: Imports
// ============================================================================

use syscheck_harness::TestProgram;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Every program, in listing order.
static PROGRAMS: &[&dyn TestProgram] = &[
    &open::Open03,
    &open::Open08,
    &mq_timedsend::MqTimedsend7_1,
    &sched_setparam::SchedSetparam17_1,
];

/// Returns every registered program.
#[must_use]
pub fn programs() -> &'static [&'static dyn TestProgram] {
    PROGRAMS
}

/// Looks up a program by TCID.
#[must_use]
pub fn find(tcid: &str) -> Option<&'static dyn TestProgram> {
    PROGRAMS.iter().copied().find(|program| program.info().tcid == tcid)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
