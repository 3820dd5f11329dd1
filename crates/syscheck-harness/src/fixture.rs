// crates/syscheck-harness/src/fixture.rs
// ============================================================================
// Module: Scratch Fixtures
// Description: Per-run temporary directories under a configurable root.
// Purpose: Give each program an isolated place for files it creates.
// Dependencies: tempfile
// ============================================================================

//! ## Overview
//! A [`ScratchDir`] is created during setup and removed when it is closed or
//! dropped. The directory name starts with the program's TCID so leftovers
//! from a kept run are easy to attribute. Programs address files through
//! [`ScratchDir::join`]; the process working directory is never changed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::Broken;

// ============================================================================
// SECTION: Scratch Directory
// ============================================================================

/// Temporary directory owned by one program run.
#[derive(Debug)]
pub struct ScratchDir {
    /// Backing directory, `None` once closed.
    dir: Option<TempDir>,
    /// Absolute path of the directory.
    path: PathBuf,
    /// Whether the directory survives close and drop.
    keep: bool,
}

impl ScratchDir {
    /// Creates `<root>/<tcid>-XXXXXX`.
    ///
    /// # Errors
    ///
    /// Returns [`Broken`] when the directory cannot be created.
    pub fn create(root: &Path, tcid: &str, keep: bool) -> Result<Self, Broken> {
        let prefix = format!("{tcid}-");
        let dir = tempfile::Builder::new()
            .prefix(&prefix)
            .disable_cleanup(keep)
            .tempdir_in(root)
            .map_err(|err| {
                Broken::from_io(format!("failed to create scratch dir in {}", root.display()), &err)
            })?;
        let path = dir.path().to_path_buf();
        Ok(Self {
            dir: Some(dir),
            path,
            keep,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `path()/name`.
    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Removes the directory and everything in it.
    ///
    /// Calling this more than once is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Broken`] when removal fails.
    pub fn close(&mut self) -> Result<(), Broken> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        if self.keep {
            return Ok(());
        }
        dir.close().map_err(|err| {
            Broken::from_io(format!("failed to remove scratch dir {}", self.path.display()), &err)
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
