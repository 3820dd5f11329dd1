// crates/syscheck-harness/src/errno.rs
// ============================================================================
// Module: Errno
// Description: Typed error numbers captured from syscalls.
// Purpose: Carry errno values with their symbolic names and descriptions.
// Dependencies: libc, serde
// ============================================================================

//! ## Overview
//! [`Errno`] wraps the raw `errno` value observed after a failed call. It is
//! `Copy`, compares by value, and renders as `EEXIST(17): File exists` so
//! report lines carry both the symbol and the host's description.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Errno
// ============================================================================

/// Raw error number reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Errno(i32);

impl Errno {
    /// No such file or directory.
    pub const ENOENT: Self = Self(libc::ENOENT);
    /// Bad file descriptor.
    pub const EBADF: Self = Self(libc::EBADF);
    /// Resource temporarily unavailable.
    pub const EAGAIN: Self = Self(libc::EAGAIN);
    /// Permission denied.
    pub const EACCES: Self = Self(libc::EACCES);
    /// Bad address.
    pub const EFAULT: Self = Self(libc::EFAULT);
    /// File exists.
    pub const EEXIST: Self = Self(libc::EEXIST);
    /// Not a directory.
    pub const ENOTDIR: Self = Self(libc::ENOTDIR);
    /// Is a directory.
    pub const EISDIR: Self = Self(libc::EISDIR);
    /// Invalid argument.
    pub const EINVAL: Self = Self(libc::EINVAL);
    /// File name too long.
    pub const ENAMETOOLONG: Self = Self(libc::ENAMETOOLONG);
    /// Function not implemented.
    pub const ENOSYS: Self = Self(libc::ENOSYS);

    /// Wraps a raw error number.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw error number.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Reads the calling thread's current `errno`.
    #[must_use]
    pub fn last() -> Self {
        Self(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    /// Returns the symbolic name, or `"UNKNOWN"` for unlisted values.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            libc::EPERM => "EPERM",
            libc::ENOENT => "ENOENT",
            libc::ESRCH => "ESRCH",
            libc::EINTR => "EINTR",
            libc::EIO => "EIO",
            libc::ENXIO => "ENXIO",
            libc::E2BIG => "E2BIG",
            libc::ENOEXEC => "ENOEXEC",
            libc::EBADF => "EBADF",
            libc::ECHILD => "ECHILD",
            libc::EAGAIN => "EAGAIN",
            libc::ENOMEM => "ENOMEM",
            libc::EACCES => "EACCES",
            libc::EFAULT => "EFAULT",
            libc::EBUSY => "EBUSY",
            libc::EEXIST => "EEXIST",
            libc::EXDEV => "EXDEV",
            libc::ENODEV => "ENODEV",
            libc::ENOTDIR => "ENOTDIR",
            libc::EISDIR => "EISDIR",
            libc::EINVAL => "EINVAL",
            libc::ENFILE => "ENFILE",
            libc::EMFILE => "EMFILE",
            libc::ENOTTY => "ENOTTY",
            libc::ETXTBSY => "ETXTBSY",
            libc::EFBIG => "EFBIG",
            libc::ENOSPC => "ENOSPC",
            libc::ESPIPE => "ESPIPE",
            libc::EROFS => "EROFS",
            libc::EMLINK => "EMLINK",
            libc::EPIPE => "EPIPE",
            libc::ERANGE => "ERANGE",
            libc::ENAMETOOLONG => "ENAMETOOLONG",
            libc::ENOSYS => "ENOSYS",
            libc::ENOTEMPTY => "ENOTEMPTY",
            libc::ELOOP => "ELOOP",
            libc::EMSGSIZE => "EMSGSIZE",
            libc::EOVERFLOW => "EOVERFLOW",
            libc::ENOTSUP => "ENOTSUP",
            libc::ETIMEDOUT => "ETIMEDOUT",
            _ => "UNKNOWN",
        }
    }

    /// Returns the host's description of the error.
    #[must_use]
    pub fn description(self) -> String {
        let rendered = io::Error::from_raw_os_error(self.0).to_string();
        match rendered.split_once(" (os error") {
            Some((text, _)) => text.to_string(),
            None => rendered,
        }
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}): {}", self.name(), self.0, self.description())
    }
}

impl From<io::Error> for Errno {
    fn from(err: io::Error) -> Self {
        Self(err.raw_os_error().unwrap_or(0))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
