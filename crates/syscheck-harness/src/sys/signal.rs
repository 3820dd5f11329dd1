// crates/syscheck-harness/src/sys/signal.rs
// ============================================================================
// Module: Start Signal
// Description: Blocks until SIGUSR1 arrives.
// Purpose: Hold a program before its first iteration when `--pause` is set.
// Dependencies: libc
// ============================================================================

//! ## Overview
//! Pausing lets an operator attach a tracer or start a load generator before
//! the checks begin. The signal is blocked first and then consumed with
//! `sigwait`, so a SIGUSR1 sent early is not lost and never reaches the
//! default handler.

#![allow(unsafe_code, reason = "Signal masks have no std equivalent.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ptr;

use crate::errno::Errno;

// ============================================================================
// SECTION: Calls
// ============================================================================

/// Blocks the calling thread until SIGUSR1 is delivered.
///
/// The previous signal mask is restored before returning.
///
/// # Errors
///
/// Returns the errno reported by the mask or wait calls.
pub fn wait_for_sigusr1() -> Result<(), Errno> {
    // SAFETY: sigset_t is plain data; sigemptyset initializes it below.
    let mut wanted: libc::sigset_t = unsafe { std::mem::zeroed() };
    // SAFETY: sigset_t is plain data and is overwritten by pthread_sigmask.
    let mut previous: libc::sigset_t = unsafe { std::mem::zeroed() };
    // SAFETY: `wanted` is a live, writable sigset_t.
    unsafe { libc::sigemptyset(&raw mut wanted) };
    // SAFETY: `wanted` was initialized by sigemptyset.
    unsafe { libc::sigaddset(&raw mut wanted, libc::SIGUSR1) };
    // SAFETY: both sets are live for the call.
    let rc = unsafe { libc::pthread_sigmask(libc::SIG_BLOCK, &raw const wanted, &raw mut previous) };
    if rc != 0 {
        return Err(Errno::from_raw(rc));
    }
    let mut received: libc::c_int = 0;
    // SAFETY: `wanted` is initialized and `received` is a live stack slot.
    let rc = unsafe { libc::sigwait(&raw const wanted, &raw mut received) };
    // SAFETY: `previous` holds the mask saved above; the out pointer is null.
    let restore = unsafe { libc::pthread_sigmask(libc::SIG_SETMASK, &raw const previous, ptr::null_mut()) };
    if rc != 0 {
        return Err(Errno::from_raw(rc));
    }
    if restore != 0 {
        return Err(Errno::from_raw(restore));
    }
    Ok(())
}
