//! Unit discovery
//!
//! Walks the source tree with walkdir and collects every directory whose name
//! contains the marker. Matching directories are still descended into, so
//! nested units are reported too.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::SyncError;
use crate::core::naming::contains_marker;

/// Directories found under a source root
#[derive(Debug, Default)]
pub struct Discovery {
    /// Matching directories, in walk order
    pub paths: Vec<PathBuf>,

    /// The error that cut the walk short, if any
    pub error: Option<SyncError>,
}

/// Find all directories under `root` whose basename contains `marker`.
///
/// The root itself is never reported. The first walk error stops discovery;
/// whatever was collected before it is kept.
pub fn discover_units(root: &Path, marker: &str) -> Discovery {
    let mut discovery = Discovery::default();

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                discovery.error = Some(SyncError::Walk { path, source: e });
                break;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if contains_marker(&name, marker) {
            tracing::debug!("discovered unit '{}'", entry.path().display());
            discovery.paths.push(entry.into_path());
        }
    }

    discovery
}
