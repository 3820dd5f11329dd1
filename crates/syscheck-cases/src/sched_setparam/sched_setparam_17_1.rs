// crates/syscheck-cases/src/sched_setparam/sched_setparam_17_1.rs
// ============================================================================
// Module: sched_setparam 17-1
// Description: Documented untested assertion for system contention scope.
// Purpose: Record the assertion in every run without exercising it.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! Threads with system scheduling contention scope cannot be created
//! portably, so the assertion is reported as UNTESTED.

use syscheck_harness::Broken;
use syscheck_harness::ExitConvention;
use syscheck_harness::Iteration;
use syscheck_harness::ProgramInfo;
use syscheck_harness::SetupEnv;
use syscheck_harness::TestProgram;
use syscheck_harness::TestRun;

/// Message recorded with the UNTESTED verdict.
pub const UNTESTED_MESSAGE: &str = "Will not test that sched_setparam have no effect on the \
                                    scheduling of threads with system scheduling contention scope.";

/// Program description.
const INFO: ProgramInfo = ProgramInfo {
    tcid: "sched_setparam_17_1",
    origin: "open_posix",
    description: "sched_setparam has no effect on system contention scope threads (untested)",
    convention: ExitConvention::OpenPosix,
    expected_errnos: &[],
    looping: false,
};

/// `sched_setparam_17_1`: reports UNTESTED.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedSetparam17_1;

impl TestProgram for SchedSetparam17_1 {
    fn info(&self) -> ProgramInfo {
        INFO
    }

    fn setup(&self, _env: &SetupEnv) -> Result<Box<dyn TestRun>, Broken> {
        Ok(Box::new(UntestedRun))
    }
}

/// Run state; nothing to set up or release.
struct UntestedRun;

impl TestRun for UntestedRun {
    fn iterate(&mut self, iteration: &mut Iteration<'_>) -> Result<(), Broken> {
        iteration.untested(UNTESTED_MESSAGE);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), Broken> {
        Ok(())
    }
}

#[cfg(test)]
mod sched_setparam_17_1_tests;
