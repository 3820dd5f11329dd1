// crates/syscheck-harness/src/sys/memory.rs
// ============================================================================
// Module: Memory Fixtures
// Description: Inaccessible mappings used as deliberately bad pointers.
// Purpose: Give EFAULT sub-cases an address the kernel cannot read.
// Dependencies: libc
// ============================================================================

//! ## Overview
//! [`UnmappedPage`] maps one page with `PROT_NONE`. Its address is inside the
//! process but unreadable, so passing it as a path makes the kernel report
//! `EFAULT` without the harness ever dereferencing it. The mapping is
//! released on drop.

#![allow(unsafe_code, reason = "mmap/munmap manage the bad-address fixture.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ptr;

use libc::c_char;
use libc::c_void;

use crate::errno::Errno;

// ============================================================================
// SECTION: Unmapped Page
// ============================================================================

/// Length of the inaccessible mapping in bytes.
const MAPPING_LEN: usize = 1;

/// One `PROT_NONE` anonymous mapping.
#[derive(Debug)]
pub struct UnmappedPage {
    /// Start of the mapping.
    addr: *mut c_void,
}

impl UnmappedPage {
    /// Maps an inaccessible anonymous page.
    ///
    /// # Errors
    ///
    /// Returns the errno reported by `mmap`.
    pub fn map() -> Result<Self, Errno> {
        // SAFETY: an anonymous private mapping with a null hint does not alias
        // any existing Rust allocation.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                MAPPING_LEN,
                libc::PROT_NONE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(Errno::last());
        }
        Ok(Self {
            addr,
        })
    }

    /// Returns the mapping address typed as a C string pointer.
    ///
    /// The pointer must only be handed to the kernel, never read.
    #[must_use]
    pub const fn as_ptr(&self) -> *const c_char {
        self.addr.cast_const().cast()
    }
}

impl Drop for UnmappedPage {
    fn drop(&mut self) {
        // SAFETY: `addr` came from a successful mmap of MAPPING_LEN bytes and
        // is unmapped exactly once.
        let _ = unsafe { libc::munmap(self.addr, MAPPING_LEN) };
    }
}
