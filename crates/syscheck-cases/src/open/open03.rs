// crates/syscheck-cases/src/open/open03.rs
// ============================================================================
// Module: open03
// Description: Basic open(O_RDWR|O_CREAT) success check.
// Purpose: Verify a file can be created, closed, and removed every iteration.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! Each iteration opens `tfile_<pid>` in the scratch directory with
//! `O_RDWR|O_CREAT` and mode `0700`. A failed open is a FAIL. After a
//! successful open the descriptor is closed and the file unlinked; either
//! step failing breaks the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::CString;
use std::fs;
use std::path::PathBuf;
use std::process;

use syscheck_harness::Broken;
use syscheck_harness::ExitConvention;
use syscheck_harness::Iteration;
use syscheck_harness::ProgramInfo;
use syscheck_harness::SetupEnv;
use syscheck_harness::TestProgram;
use syscheck_harness::TestRun;
use syscheck_harness::fixture::ScratchDir;
use syscheck_harness::sys::fs::OpenFlags;
use syscheck_harness::sys::fs::PathArg;
use syscheck_harness::sys::fs::close;
use syscheck_harness::sys::fs::descriptor;
use syscheck_harness::sys::fs::open;
use syscheck_harness::sys::path_cstring;

// ============================================================================
// SECTION: Program
// ============================================================================

/// Flags under test.
const FLAGS: OpenFlags = OpenFlags::RDWR.union(OpenFlags::CREAT);

/// Mode for the created file.
const MODE: u32 = 0o700;

/// Program description.
const INFO: ProgramInfo = ProgramInfo {
    tcid: "open03",
    origin: "ltp",
    description: "open(O_RDWR|O_CREAT) creates a file that can be closed and unlinked",
    convention: ExitConvention::Ltp,
    expected_errnos: &[],
    looping: true,
};

/// `open03`: basic create-and-remove check.
#[derive(Debug, Clone, Copy, Default)]
pub struct Open03;

impl TestProgram for Open03 {
    fn info(&self) -> ProgramInfo {
        INFO
    }

    fn setup(&self, env: &SetupEnv) -> Result<Box<dyn TestRun>, Broken> {
        let scratch = env.scratch_dir(INFO.tcid)?;
        let path = scratch.join(&format!("tfile_{}", process::id()));
        Ok(Box::new(Open03Run {
            c_path: path_cstring(&path)?,
            path,
            scratch,
        }))
    }
}

// ============================================================================
// SECTION: Run State
// ============================================================================

/// Live state between setup and cleanup.
struct Open03Run {
    /// Scratch directory holding the file.
    scratch: ScratchDir,
    /// File created each iteration.
    path: PathBuf,
    /// `path` as handed to the kernel.
    c_path: CString,
}

impl TestRun for Open03Run {
    fn iterate(&mut self, iteration: &mut Iteration<'_>) -> Result<(), Broken> {
        let outcome = open(PathArg::Path(&self.c_path), FLAGS, MODE);
        let call = format!("open({}, {FLAGS},{MODE:04o})", self.path.display());
        if let Some(errno) = outcome.errno {
            iteration.fail_errno(format!("{call} failed"), errno);
            return Ok(());
        }
        let Some(fd) = descriptor(&outcome) else {
            iteration.fail(format!("{call} returned {}", outcome.ret));
            return Ok(());
        };
        if iteration.functional() {
            iteration.pass(format!("{call} returned {fd}"));
        }
        close(fd).map_err(|errno| Broken::with_errno(format!("close({fd}) failed"), errno))?;
        fs::remove_file(&self.path).map_err(|err| {
            Broken::from_io(format!("unlink({}) failed", self.path.display()), &err)
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), Broken> {
        self.scratch.close()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod open03_tests;
