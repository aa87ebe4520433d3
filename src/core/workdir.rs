//! Scoped working-directory switch
//!
//! The build step runs with the unit's destination as the process working
//! directory. `WorkdirGuard` restores the previous directory when dropped, so
//! every exit path out of the build (success, failure, spawn error, panic)
//! leaves the process where it started.

use std::env;
use std::path::{Path, PathBuf};

use crate::core::error::{SyncError, SyncResult};

#[derive(Debug)]
pub struct WorkdirGuard {
    previous: PathBuf,
}

impl WorkdirGuard {
    /// Switch into `dir`, remembering the current directory
    pub fn enter(dir: &Path) -> SyncResult<Self> {
        let previous = env::current_dir()
            .map_err(|e| SyncError::io("read current directory", ".", e))?;
        env::set_current_dir(dir).map_err(|e| SyncError::io("enter directory", dir, e))?;
        Ok(Self { previous })
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            tracing::error!(
                "failed to restore working directory '{}': {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Serializes tests that change the process working directory
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
