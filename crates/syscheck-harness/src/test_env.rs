// crates/syscheck-harness/src/test_env.rs
// ============================================================================
// Module: Test Environment Guards
// Description: Serialized, restoring environment mutation for unit tests.
// Purpose: Let config and option tests set SYSCHECK_* variables safely.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Every test that reads or writes `SYSCHECK_*` variables holds
//! [`env_lock`] and an [`EnvGuard`], which clears the keys on entry and
//! restores their previous values on drop.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::sync::Mutex;
use std::sync::OnceLock;

use crate::config::HarnessEnv;

pub mod env_mut {
    #![allow(unsafe_code, reason = "Tests mutate process env vars in a controlled scope.")]

    /// Sets an environment variable for the current process.
    pub fn set_var(key: &str, value: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Removes an environment variable from the current process.
    pub fn remove_var(key: &str) {
        // SAFETY: Tests serialize environment mutation via a global lock.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

/// Serializes environment access across tests.
pub fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Clears `SYSCHECK_*` keys and restores them on drop.
pub struct EnvGuard {
    entries: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    /// Snapshots and clears every harness key.
    pub fn capture() -> Self {
        let entries = HarnessEnv::ALL
            .iter()
            .map(|key| (key.as_str(), std::env::var(key.as_str()).ok()))
            .collect();
        for key in HarnessEnv::ALL {
            env_mut::remove_var(key.as_str());
        }
        Self {
            entries,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.entries.drain(..) {
            match value {
                Some(value) => env_mut::set_var(name, &value),
                None => env_mut::remove_var(name),
            }
        }
    }
}
