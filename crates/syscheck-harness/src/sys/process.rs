// crates/syscheck-harness/src/sys/process.rs
// ============================================================================
// Module: Process Credentials
// Description: Effective IDs, umask, and privilege drop for setup phases.
// Purpose: Let programs run their checks as an unprivileged user.
// Dependencies: libc
// ============================================================================

//! ## Overview
//! Permission-dependent sub-cases (for example `EACCES` on a root-owned
//! binary) only hold for an unprivileged caller. Setup therefore starts as
//! root and switches to a named account, group first, then user, so the
//! group change is still permitted.

#![allow(unsafe_code, reason = "Credential syscalls have no std equivalent.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::CStr;
use std::ffi::CString;
use std::ptr;

use crate::errno::Errno;
use crate::error::Broken;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Initial buffer for `getpwnam_r` string storage.
const PASSWD_BUFFER_LEN: usize = 1024;
/// Upper bound for `getpwnam_r` buffer growth.
const PASSWD_BUFFER_MAX: usize = 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Numeric identity of a passwd entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIds {
    /// User ID.
    pub uid: u32,
    /// Primary group ID.
    pub gid: u32,
}

// ============================================================================
// SECTION: Calls
// ============================================================================

/// Returns the effective user ID.
#[must_use]
pub fn effective_uid() -> u32 {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() }
}

/// Sets the file mode creation mask and returns the previous one.
pub fn set_umask(mask: u32) -> u32 {
    // SAFETY: umask has no preconditions and cannot fail.
    unsafe { libc::umask(mask) }
}

/// Looks up a user by name.
///
/// Returns `Ok(None)` when no such user exists.
///
/// # Errors
///
/// Returns the errno reported by `getpwnam_r`, or `EINVAL` for a name with
/// an interior NUL.
pub fn lookup_user(name: &str) -> Result<Option<UserIds>, Errno> {
    let cname = CString::new(name).map_err(|_| Errno::EINVAL)?;
    let mut buffer = vec![0_u8; PASSWD_BUFFER_LEN];
    loop {
        match getpwnam_into(&cname, &mut buffer) {
            Err(errno) if errno.raw() == libc::ERANGE && buffer.len() < PASSWD_BUFFER_MAX => {
                buffer.resize(buffer.len() * 2, 0);
            }
            other => return other,
        }
    }
}

/// Switches the process to `user`'s group and then its user ID.
///
/// # Errors
///
/// Returns [`Broken`] when the user is unknown or either switch fails.
pub fn drop_privileges(user: &str) -> Result<UserIds, Broken> {
    let ids = match lookup_user(user) {
        Ok(Some(ids)) => ids,
        Ok(None) => return Err(Broken::new(format!("user {user} does not exist"))),
        Err(errno) => return Err(Broken::with_errno(format!("getpwnam({user}) failed"), errno)),
    };
    // SAFETY: setgid has no memory-safety preconditions.
    if unsafe { libc::setgid(ids.gid) } == -1 {
        return Err(Broken::with_errno(format!("setgid({}) failed", ids.gid), Errno::last()));
    }
    // SAFETY: setuid has no memory-safety preconditions.
    if unsafe { libc::setuid(ids.uid) } == -1 {
        return Err(Broken::with_errno(format!("setuid({}) failed", ids.uid), Errno::last()));
    }
    Ok(ids)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs one `getpwnam_r` attempt with the provided scratch buffer.
fn getpwnam_into(name: &CStr, buffer: &mut [u8]) -> Result<Option<UserIds>, Errno> {
    // SAFETY: passwd is a plain C struct; all-zero is a valid initial value.
    let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
    let mut result: *mut libc::passwd = ptr::null_mut();
    // SAFETY: every pointer is live for the call and `buffer.len()` matches
    // the writable region handed to libc.
    let rc = unsafe {
        libc::getpwnam_r(
            name.as_ptr(),
            &raw mut entry,
            buffer.as_mut_ptr().cast(),
            buffer.len(),
            &raw mut result,
        )
    };
    if rc != 0 {
        return Err(Errno::from_raw(rc));
    }
    if result.is_null() {
        return Ok(None);
    }
    Ok(Some(UserIds {
        uid: entry.pw_uid,
        gid: entry.pw_gid,
    }))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
