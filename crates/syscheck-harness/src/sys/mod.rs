// crates/syscheck-harness/src/sys/mod.rs
// ============================================================================
// Module: Syscall Shims
// Description: Thin, audited wrappers over the libc calls under test.
// Purpose: Confine every unsafe call to one module tree.
// Dependencies: libc
// ============================================================================

//! ## Overview
//! The programs verify raw syscall behavior, so the wrappers here pass
//! arguments through unchanged and capture the return value and `errno`
//! immediately after the call. Nothing is retried and nothing is
//! interpreted; classification happens in [`crate::table`].
//!
//! Invariants:
//! - `errno` is read before any other call can clobber it.
//! - Every resource handed out (descriptor, queue, mapping) is owned by a
//!   guard that releases it on drop.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fs;
pub mod memory;
pub mod mqueue;
pub mod process;
pub mod signal;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::errno::Errno;
use crate::error::Broken;

// ============================================================================
// SECTION: Syscall Outcome
// ============================================================================

/// Return value and errno captured from one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallOutcome {
    /// Raw return value.
    pub ret: i64,
    /// Errno, present only when the call reported failure.
    pub errno: Option<Errno>,
}

impl SyscallOutcome {
    /// Captures the outcome of a call whose failure sentinel is `-1`.
    ///
    /// Must be called directly after the syscall returns.
    #[must_use]
    pub fn capture(ret: i64) -> Self {
        if ret == -1 {
            Self {
                ret,
                errno: Some(Errno::last()),
            }
        } else {
            Self {
                ret,
                errno: None,
            }
        }
    }

    /// Returns an outcome for a call that succeeded with `ret`.
    #[must_use]
    pub const fn success(ret: i64) -> Self {
        Self {
            ret,
            errno: None,
        }
    }

    /// Returns an outcome for a call that failed with `errno`.
    #[must_use]
    pub const fn failure(errno: Errno) -> Self {
        Self {
            ret: -1,
            errno: Some(errno),
        }
    }

    /// Returns true when the call did not report failure.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.errno.is_none()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a path into a NUL-terminated C string.
///
/// # Errors
///
/// Returns [`Broken`] when the path contains an interior NUL byte.
pub fn path_cstring(path: &Path) -> Result<CString, Broken> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| Broken::new(format!("path {} contains a NUL byte", path.display())))
}
