//! Error taxonomy for the sync pipeline
//!
//! Every per-unit operation returns one of these. The pipeline logs them at the
//! point of occurrence and moves on; none of them abort a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Walking a directory tree failed
    #[error("failed to walk '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Creating, removing or copying a path failed
    #[error("failed to {action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Source and destination contain one another
    #[error(
        "source '{}' and destination '{}' overlap",
        .source_dir.display(),
        .destination.display()
    )]
    Overlap {
        source_dir: PathBuf,
        destination: PathBuf,
    },

    /// A unit name that does not name a single entry inside the target
    #[error("unit name '{name}' does not resolve to a directory inside '{}'", .target.display())]
    UnsafeName { name: String, target: PathBuf },

    /// The manifest could not be serialized
    #[error("failed to serialize manifest '{}': {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The build command could not be started
    #[error("failed to run '{command}' in '{}': {source}", .cwd.display())]
    Spawn {
        command: String,
        cwd: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The build command ran and exited unsuccessfully
    #[error("'{command}' in '{}' exited with {status}: {stderr}", .cwd.display())]
    BuildFailed {
        command: String,
        cwd: PathBuf,
        status: String,
        stderr: String,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SyncError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        SyncError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
