// crates/syscheck-harness/src/sys/mqueue.rs
// ============================================================================
// Module: POSIX Message Queues
// Description: Owned message queue descriptors and raw send/receive calls.
// Purpose: Exercise mq_open/mq_timedsend/mq_receive with caller-chosen limits.
// Dependencies: libc
// ============================================================================

//! ## Overview
//! [`MessageQueue`] owns an `mqd_t` and closes it on drop unless it was closed
//! explicitly through [`MessageQueue::close`], which reports the errno.
//! Queue names are global, so callers remove them with
//! [`MessageQueue::unlink`] or hold a [`QueueName`] guard that does it on
//! drop.

#![allow(unsafe_code, reason = "mq_* calls are the behavior under test.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::CStr;
use std::ffi::CString;
use std::time::Duration;

use libc::c_uint;

use crate::errno::Errno;
use crate::sys::SyscallOutcome;
use crate::sys::fs::OpenFlags;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Queue limits requested at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueAttr {
    /// Maximum number of queued messages.
    pub max_messages: i64,
    /// Maximum size of one message in bytes.
    pub message_size: i64,
}

/// A message taken off a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Received {
    /// Number of bytes written into the buffer.
    pub len: usize,
    /// Priority the message was sent with.
    pub priority: u32,
}

/// An open message queue descriptor.
#[derive(Debug)]
pub struct MessageQueue {
    /// Descriptor, `None` once closed.
    mqd: Option<libc::mqd_t>,
}

impl MessageQueue {
    /// Calls `mq_open(name, flags, mode, attr)`.
    ///
    /// # Errors
    ///
    /// Returns the errno reported by `mq_open`.
    pub fn open(
        name: &CStr,
        flags: OpenFlags,
        mode: u32,
        attr: Option<QueueAttr>,
    ) -> Result<Self, Errno> {
        let mut raw_attr = zeroed_attr();
        let attr_ptr = match attr {
            Some(attr) => {
                raw_attr.mq_maxmsg = to_c_long(attr.max_messages);
                raw_attr.mq_msgsize = to_c_long(attr.message_size);
                &raw mut raw_attr
            }
            None => std::ptr::null_mut(),
        };
        // SAFETY: `name` is NUL-terminated and `attr_ptr` is null or points at
        // a fully initialized mq_attr that outlives the call.
        let mqd = unsafe { libc::mq_open(name.as_ptr(), flags.bits(), c_uint::from(mode), attr_ptr) };
        if mqd == -1 {
            return Err(Errno::last());
        }
        Ok(Self {
            mqd: Some(mqd),
        })
    }

    /// Calls `mq_timedsend` with an absolute `CLOCK_REALTIME` deadline.
    #[must_use]
    pub fn timed_send(&self, message: &[u8], priority: u32, deadline: Duration) -> SyscallOutcome {
        let Some(mqd) = self.mqd else {
            return SyscallOutcome::failure(Errno::EBADF);
        };
        let timeout = timespec_from(deadline);
        // SAFETY: `message` is valid for `message.len()` bytes and `timeout`
        // lives on the stack for the duration of the call.
        let ret = unsafe {
            libc::mq_timedsend(mqd, message.as_ptr().cast(), message.len(), priority, &raw const timeout)
        };
        SyscallOutcome::capture(i64::from(ret))
    }

    /// Calls `mq_receive` into `buffer`.
    ///
    /// # Errors
    ///
    /// Returns the errno reported by `mq_receive`.
    pub fn receive(&self, buffer: &mut [u8]) -> Result<Received, Errno> {
        let Some(mqd) = self.mqd else {
            return Err(Errno::EBADF);
        };
        let mut priority: c_uint = 0;
        // SAFETY: `buffer` is writable for `buffer.len()` bytes and `priority`
        // is a live stack slot.
        let ret = unsafe {
            libc::mq_receive(mqd, buffer.as_mut_ptr().cast(), buffer.len(), &raw mut priority)
        };
        let len = usize::try_from(ret).map_err(|_| Errno::last())?;
        Ok(Received {
            len,
            priority,
        })
    }

    /// Calls `mq_close`, consuming the descriptor.
    ///
    /// # Errors
    ///
    /// Returns the errno reported by `mq_close`.
    pub fn close(mut self) -> Result<(), Errno> {
        match self.mqd.take() {
            Some(mqd) => close_raw(mqd),
            None => Ok(()),
        }
    }

    /// Calls `mq_unlink(name)`.
    ///
    /// # Errors
    ///
    /// Returns the errno reported by `mq_unlink`.
    pub fn unlink(name: &CStr) -> Result<(), Errno> {
        // SAFETY: `name` is a NUL-terminated string borrowed for the call.
        let ret = unsafe { libc::mq_unlink(name.as_ptr()) };
        if ret == -1 { Err(Errno::last()) } else { Ok(()) }
    }
}

impl Drop for MessageQueue {
    fn drop(&mut self) {
        if let Some(mqd) = self.mqd.take() {
            let _ = close_raw(mqd);
        }
    }
}

// ============================================================================
// SECTION: Queue Name Guard
// ============================================================================

/// A queue name that is unlinked on drop unless released first.
#[derive(Debug)]
pub struct QueueName {
    /// NUL-terminated queue name.
    name: CString,
    /// Whether drop still owes an unlink.
    armed: bool,
}

impl QueueName {
    /// Builds a guard for `name`, which must start with `/`.
    ///
    /// # Errors
    ///
    /// Returns `EINVAL` when the name lacks a leading slash or holds a NUL.
    pub fn new(name: &str) -> Result<Self, Errno> {
        if !name.starts_with('/') {
            return Err(Errno::EINVAL);
        }
        let name = CString::new(name).map_err(|_| Errno::EINVAL)?;
        Ok(Self {
            name,
            armed: true,
        })
    }

    /// Returns the name as passed to the kernel.
    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        &self.name
    }

    /// Unlinks the queue now and disarms the guard.
    ///
    /// # Errors
    ///
    /// Returns the errno reported by `mq_unlink`.
    pub fn unlink(&mut self) -> Result<(), Errno> {
        self.armed = false;
        MessageQueue::unlink(&self.name)
    }
}

impl Drop for QueueName {
    fn drop(&mut self) {
        if self.armed {
            let _ = MessageQueue::unlink(&self.name);
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns an all-zero `mq_attr`.
fn zeroed_attr() -> libc::mq_attr {
    // SAFETY: mq_attr is a plain C struct of integers; all-zero is valid.
    unsafe { std::mem::zeroed() }
}

/// Closes a raw queue descriptor.
fn close_raw(mqd: libc::mqd_t) -> Result<(), Errno> {
    // SAFETY: `mqd` was returned by mq_open and is closed exactly once.
    let ret = unsafe { libc::mq_close(mqd) };
    if ret == -1 { Err(Errno::last()) } else { Ok(()) }
}

/// Converts a limit into the platform `long`, saturating on overflow.
fn to_c_long(value: i64) -> libc::c_long {
    libc::c_long::try_from(value).unwrap_or(libc::c_long::MAX)
}

/// Converts a time since the epoch into a `timespec`.
fn timespec_from(since_epoch: Duration) -> libc::timespec {
    libc::timespec {
        tv_sec: libc::time_t::try_from(since_epoch.as_secs()).unwrap_or(libc::time_t::MAX),
        tv_nsec: libc::c_long::try_from(since_epoch.subsec_nanos()).unwrap_or(0),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod mqueue_tests;
