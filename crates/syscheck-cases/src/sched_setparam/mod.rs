// crates/syscheck-cases/src/sched_setparam/mod.rs
// ============================================================================
// Module: sched_setparam Programs
// Description: Open POSIX assertions for sched_setparam(2).
// Purpose: Group the scheduling parameter programs under one module.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! - [`SchedSetparam17_1`]: an assertion with no portable check, reported
//!   as UNTESTED.

mod sched_setparam_17_1;

pub use sched_setparam_17_1::SchedSetparam17_1;
