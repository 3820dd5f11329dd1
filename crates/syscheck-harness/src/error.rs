// crates/syscheck-harness/src/error.rs
// ============================================================================
// Module: Harness Errors
// Description: Abort signal for broken runs and harness-level failures.
// Purpose: Separate "the test could not run" from "the harness itself failed".
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`Broken`] is returned through `Err` by setup, iteration, and cleanup when
//! a precondition cannot be established; the driver records it as a BROKEN
//! verdict and aborts the run. [`HarnessError`] covers failures outside any
//! verdict: bad options, unreadable config, or a report that cannot be
//! written.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::errno::Errno;
use crate::report::ReportError;

// ============================================================================
// SECTION: Broken
// ============================================================================

/// A precondition failure that invalidates the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broken {
    /// Human-readable reason.
    message: String,
    /// Errno that caused the failure, when one was observed.
    errno: Option<Errno>,
}

impl Broken {
    /// Creates a broken signal without an errno.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errno: None,
        }
    }

    /// Creates a broken signal carrying the errno that caused it.
    pub fn with_errno(message: impl Into<String>, errno: Errno) -> Self {
        Self {
            message: message.into(),
            errno: Some(errno),
        }
    }

    /// Creates a broken signal from an I/O error.
    pub fn from_io(message: impl Into<String>, err: &io::Error) -> Self {
        match err.raw_os_error() {
            Some(raw) => Self::with_errno(message, Errno::from_raw(raw)),
            None => Self::new(format!("{}: {err}", message.into())),
        }
    }

    /// Returns the errno that caused the failure, if any.
    #[must_use]
    pub const fn errno(&self) -> Option<Errno> {
        self.errno
    }
}

impl fmt::Display for Broken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errno {
            Some(errno) => write!(f, "{}: errno={errno}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Broken {}

// ============================================================================
// SECTION: Harness Error
// ============================================================================

/// Failures of the harness itself, outside any verdict.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A report or artifact could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// Command-line options were inconsistent.
    #[error("invalid option: {0}")]
    Options(String),
    /// No program matched the requested identifier.
    #[error("unknown test program: {0}")]
    UnknownProgram(String),
}
