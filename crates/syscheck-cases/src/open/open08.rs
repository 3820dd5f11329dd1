// crates/syscheck-cases/src/open/open08.rs
// ============================================================================
// Module: open08
// Description: Table-driven open(2) error path checks.
// Purpose: Verify open(2) fails with the documented errno for each bad input.
// Dependencies: syscheck-harness
// ============================================================================

//! ## Overview
//! Setup clears the umask, requires root, then switches to an unprivileged
//! account so permission checks apply. It creates `open3.<pid>` (mode `0600`)
//! in a scratch directory and maps one inaccessible page for the bad-address
//! case. Each iteration walks [`CASES`] once with mode `0644`.
//!
//! The privilege switch cannot be undone; later programs in the same process
//! run as the unprivileged account.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::CStr;
use std::ffi::CString;
use std::process;
use std::sync::LazyLock;

use syscheck_harness::Broken;
use syscheck_harness::Errno;
use syscheck_harness::ExitConvention;
use syscheck_harness::Expectation;
use syscheck_harness::Iteration;
use syscheck_harness::ProgramInfo;
use syscheck_harness::SetupEnv;
use syscheck_harness::SubCase;
use syscheck_harness::TestProgram;
use syscheck_harness::TestRun;
use syscheck_harness::fixture::ScratchDir;
use syscheck_harness::sys::fs::OpenFlags;
use syscheck_harness::sys::fs::PathArg;
use syscheck_harness::sys::fs::close;
use syscheck_harness::sys::fs::descriptor;
use syscheck_harness::sys::fs::open;
use syscheck_harness::sys::memory::UnmappedPage;
use syscheck_harness::sys::path_cstring;
use syscheck_harness::sys::process::drop_privileges;
use syscheck_harness::sys::process::effective_uid;
use syscheck_harness::sys::process::set_umask;
use syscheck_harness::table::evaluate;
use syscheck_harness::table::expected_errnos;

// ============================================================================
// SECTION: Case Table
// ============================================================================

/// Mode passed with every call.
const MODE: u32 = 0o644;

/// Mode of the file created during setup.
const CREATED_MODE: u32 = 0o600;

/// Length of the over-long path component.
const LONG_NAME_LEN: usize = 300;

/// Pathname argument of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The file created during setup.
    CreatedFile,
    /// A fixed system path.
    Literal(&'static CStr),
    /// A path whose last component exceeds `NAME_MAX`.
    LongName,
    /// An address inside an inaccessible mapping.
    Unmapped,
}

/// Error cases, evaluated in order every iteration.
pub const CASES: &[SubCase<(Target, OpenFlags)>] = &[
    SubCase {
        label: "open(existing file, O_CREAT|O_EXCL)",
        input: (Target::CreatedFile, OpenFlags::CREAT.union(OpenFlags::EXCL)),
        expect: Expectation::Failure(Errno::EEXIST),
    },
    SubCase {
        label: "open(/tmp, O_RDWR)",
        input: (Target::Literal(c"/tmp"), OpenFlags::RDWR),
        expect: Expectation::Failure(Errno::EISDIR),
    },
    SubCase {
        label: "open(existing file, O_DIRECTORY)",
        input: (Target::CreatedFile, OpenFlags::DIRECTORY),
        expect: Expectation::Failure(Errno::ENOTDIR),
    },
    SubCase {
        label: "open(long name, O_RDWR)",
        input: (Target::LongName, OpenFlags::RDWR),
        expect: Expectation::Failure(Errno::ENAMETOOLONG),
    },
    SubCase {
        label: "open(/bin/cat, O_WRONLY)",
        input: (Target::Literal(c"/bin/cat"), OpenFlags::WRONLY),
        expect: Expectation::Failure(Errno::EACCES),
    },
    SubCase {
        label: "open(unmapped address, O_CREAT)",
        input: (Target::Unmapped, OpenFlags::CREAT),
        expect: Expectation::Failure(Errno::EFAULT),
    },
];

// ============================================================================
// SECTION: Program
// ============================================================================

/// Program identifier.
const TCID: &str = "open08";

/// Errnos declared by [`CASES`], in row order.
static EXPECTED_ERRNOS: LazyLock<Vec<Errno>> = LazyLock::new(|| expected_errnos(CASES));

/// `open08`: open(2) error paths as an unprivileged user.
#[derive(Debug, Clone, Copy, Default)]
pub struct Open08;

impl TestProgram for Open08 {
    fn info(&self) -> ProgramInfo {
        ProgramInfo {
            tcid: TCID,
            origin: "ltp",
            description: "open(2) returns EEXIST, EISDIR, ENOTDIR, ENAMETOOLONG, EACCES, EFAULT",
            convention: ExitConvention::Ltp,
            expected_errnos: EXPECTED_ERRNOS.as_slice(),
            looping: true,
        }
    }

    fn setup(&self, env: &SetupEnv) -> Result<Box<dyn TestRun>, Broken> {
        let previous_umask = set_umask(0);
        prepare(env, previous_umask).inspect_err(|_| {
            set_umask(previous_umask);
        })
    }
}

/// Builds the run with the umask already cleared.
///
/// The scratch directory removes itself on drop when a later step fails.
fn prepare(env: &SetupEnv, previous_umask: u32) -> Result<Box<dyn TestRun>, Broken> {
    if effective_uid() != 0 {
        return Err(Broken::new("Test must be run as root"));
    }
    drop_privileges(&env.unprivileged_user)?;

    let scratch = env.scratch_dir(TCID)?;
    let created = path_cstring(&scratch.join(&format!("open3.{}", process::id())))?;
    let long_name = path_cstring(&scratch.join(&"a".repeat(LONG_NAME_LEN)))?;
    let flags = OpenFlags::WRONLY | OpenFlags::CREAT | OpenFlags::TRUNC;
    let outcome = open(PathArg::Path(&created), flags, CREATED_MODE);
    let Some(fd) = descriptor(&outcome) else {
        let errno = outcome.errno.unwrap_or_else(Errno::last);
        return Err(Broken::with_errno(format!("creat(open3, {CREATED_MODE:04o}) failed"), errno));
    };
    close(fd).map_err(|errno| Broken::with_errno(format!("close({fd}) failed"), errno))?;
    let page =
        UnmappedPage::map().map_err(|errno| Broken::with_errno("mmap(PROT_NONE) failed", errno))?;
    Ok(Box::new(Open08Run {
        scratch,
        created,
        long_name,
        page: Some(page),
        previous_umask,
    }))
}

// ============================================================================
// SECTION: Run State
// ============================================================================

/// Live state between setup and cleanup.
struct Open08Run {
    /// Scratch directory holding the created file.
    scratch: ScratchDir,
    /// Path of the file created during setup.
    created: CString,
    /// Over-long path under the scratch directory.
    long_name: CString,
    /// Inaccessible mapping, released in cleanup.
    page: Option<UnmappedPage>,
    /// Umask in effect before setup.
    previous_umask: u32,
}

impl TestRun for Open08Run {
    fn iterate(&mut self, iteration: &mut Iteration<'_>) -> Result<(), Broken> {
        for case in CASES {
            let (target, flags) = case.input;
            let path = match target {
                Target::CreatedFile => PathArg::Path(&self.created),
                Target::Literal(path) => PathArg::Path(path),
                Target::LongName => PathArg::Path(&self.long_name),
                Target::Unmapped => match &self.page {
                    Some(page) => PathArg::Unmapped(page),
                    None => return Err(Broken::new("bad-address mapping already released")),
                },
            };
            let outcome = open(path, flags, MODE);
            if let Some(fd) = descriptor(&outcome)
                && let Err(errno) = close(fd)
            {
                iteration.info(&format!("close({fd}) after {} failed: errno={errno}", case.label));
            }
            iteration.apply(evaluate(&outcome, case.expect, case.label));
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), Broken> {
        self.page = None;
        set_umask(self.previous_umask);
        self.scratch.close()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
