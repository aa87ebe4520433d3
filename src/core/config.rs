//! Run configuration
//!
//! Defaults reproduce the classic layout: directories containing "game" are
//! copied without their "_game" suffix and any `.go` file inside is built with
//! `go build`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::error::{SyncError, SyncResult};

/// Substring that marks a directory as a unit (case-insensitive)
pub const DEFAULT_MARKER: &str = "game";

/// Substring removed from a unit's directory name
pub const DEFAULT_STRIP: &str = "_game";

/// Extension of the file handed to the build command
pub const DEFAULT_EXTENSION: &str = ".go";

/// Build command, split on whitespace
pub const DEFAULT_BUILD_COMMAND: &str = "go build";

/// Manifest file name inside the target root
pub const MANIFEST_FILE: &str = "metadata.json";

/// External build command: a program plus fixed leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl FromStr for BuildCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| "build command must not be empty".to_string())?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: vec!["build".to_string()],
        }
    }
}

/// Everything a sync run needs to know
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Absolute source root
    pub source: PathBuf,

    /// Absolute target root
    pub target: PathBuf,

    pub marker: String,
    pub strip: String,
    pub extension: String,

    /// `None` disables the build step entirely
    pub build: Option<BuildCommand>,
}

impl SyncConfig {
    /// Create a config with default tokens for the given roots
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            marker: DEFAULT_MARKER.to_string(),
            strip: DEFAULT_STRIP.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            build: Some(BuildCommand::default()),
        }
    }

    /// Path of the manifest written at the end of a run
    pub fn manifest_path(&self) -> PathBuf {
        self.target.join(MANIFEST_FILE)
    }

    /// Reject configurations that would match everything or build nothing
    pub fn validate(&self) -> SyncResult<()> {
        if self.marker.is_empty() {
            return Err(SyncError::Config("marker must not be empty".to_string()));
        }
        if self.extension.is_empty() {
            return Err(SyncError::Config(
                "code extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
