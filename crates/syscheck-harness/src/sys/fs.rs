// crates/syscheck-harness/src/sys/fs.rs
// ============================================================================
// Module: File Syscalls
// Description: Raw open/close wrappers and open flag rendering.
// Purpose: Invoke open(2) with exactly the arguments a sub-case specifies.
// Dependencies: libc
// ============================================================================

//! ## Overview
//! `open` is called through libc rather than `std::fs` because sub-cases pass
//! arguments `std` refuses to build: unmapped path pointers, flag mixes such
//! as `O_DIRECTORY` on a regular file, and explicit mode bits.

#![allow(unsafe_code, reason = "Raw file syscalls are the behavior under test.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::CStr;
use std::fmt;
use std::ops::BitOr;
use std::os::fd::RawFd;

use libc::c_char;
use libc::c_int;

use crate::errno::Errno;
use crate::sys::SyscallOutcome;
use crate::sys::memory::UnmappedPage;

// ============================================================================
// SECTION: Open Flags
// ============================================================================

/// Flags passed as the second argument of `open(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags(c_int);

impl OpenFlags {
    /// Read-only access.
    pub const RDONLY: Self = Self(libc::O_RDONLY);
    /// Write-only access.
    pub const WRONLY: Self = Self(libc::O_WRONLY);
    /// Read-write access.
    pub const RDWR: Self = Self(libc::O_RDWR);
    /// Create the file when missing.
    pub const CREAT: Self = Self(libc::O_CREAT);
    /// Fail when the file exists (with `CREAT`).
    pub const EXCL: Self = Self(libc::O_EXCL);
    /// Truncate on open.
    pub const TRUNC: Self = Self(libc::O_TRUNC);
    /// Non-blocking mode.
    pub const NONBLOCK: Self = Self(libc::O_NONBLOCK);
    /// Fail unless the path is a directory.
    pub const DIRECTORY: Self = Self(libc::O_DIRECTORY);

    /// Named flags rendered after the access mode.
    const NAMED: [(c_int, &'static str); 5] = [
        (libc::O_CREAT, "O_CREAT"),
        (libc::O_EXCL, "O_EXCL"),
        (libc::O_TRUNC, "O_TRUNC"),
        (libc::O_NONBLOCK, "O_NONBLOCK"),
        (libc::O_DIRECTORY, "O_DIRECTORY"),
    ];

    /// Combines two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the raw flag bits.
    #[must_use]
    pub const fn bits(self) -> c_int {
        self.0
    }
}

impl BitOr for OpenFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for OpenFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = Vec::new();
        let mut rest = self.0 & !libc::O_ACCMODE;
        for (bit, name) in Self::NAMED {
            if rest & bit != 0 {
                names.push(name.to_string());
                rest &= !bit;
            }
        }
        if rest != 0 {
            names.push(format!("{rest:#x}"));
        }
        let access = match self.0 & libc::O_ACCMODE {
            libc::O_WRONLY => Some("O_WRONLY"),
            libc::O_RDWR => Some("O_RDWR"),
            _ if names.is_empty() => Some("O_RDONLY"),
            _ => None,
        };
        if let Some(access) = access {
            names.insert(0, access.to_string());
        }
        f.write_str(&names.join("|"))
    }
}

// ============================================================================
// SECTION: Path Arguments
// ============================================================================

/// The pathname argument of `open(2)`.
#[derive(Debug, Clone, Copy)]
pub enum PathArg<'a> {
    /// A valid NUL-terminated path.
    Path(&'a CStr),
    /// An address inside an inaccessible mapping.
    Unmapped(&'a UnmappedPage),
}

impl PathArg<'_> {
    /// Returns the raw pointer handed to the kernel.
    fn as_ptr(&self) -> *const c_char {
        match self {
            Self::Path(path) => path.as_ptr(),
            Self::Unmapped(page) => page.as_ptr(),
        }
    }
}

// ============================================================================
// SECTION: Calls
// ============================================================================

/// Calls `open(path, flags, mode)` and captures the outcome.
#[must_use]
pub fn open(path: PathArg<'_>, flags: OpenFlags, mode: u32) -> SyscallOutcome {
    let ptr = path.as_ptr();
    // SAFETY: `ptr` is either a live NUL-terminated string borrowed for the
    // duration of the call or an address inside a PROT_NONE mapping kept alive
    // by the borrow; the kernel validates it and reports EFAULT for the latter.
    let ret = unsafe { libc::open(ptr, flags.bits(), libc::c_uint::from(mode)) };
    SyscallOutcome::capture(i64::from(ret))
}

/// Returns the descriptor produced by a successful `open`.
#[must_use]
pub fn descriptor(outcome: &SyscallOutcome) -> Option<RawFd> {
    if outcome.succeeded() { RawFd::try_from(outcome.ret).ok() } else { None }
}

/// Calls `close(fd)`.
///
/// # Errors
///
/// Returns the errno reported by `close`.
pub fn close(fd: RawFd) -> Result<(), Errno> {
    // SAFETY: closing a descriptor is memory-safe; callers pass descriptors
    // they own and never use them afterwards.
    let ret = unsafe { libc::close(fd) };
    if ret == -1 { Err(Errno::last()) } else { Ok(()) }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
