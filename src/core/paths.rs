//! Path utilities

use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::core::error::{SyncError, SyncResult};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve a user-supplied path against a base directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_from(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Destination of a unit inside `target`.
///
/// The name must be exactly one normal path component, so the result is
/// always a strict child of `target`. Empty, `.` and `..` are rejected.
pub fn unit_destination(target: &Path, name: &OsStr) -> SyncResult<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(target.join(part)),
        _ => Err(SyncError::UnsafeName {
            name: name.to_string_lossy().into_owned(),
            target: target.to_path_buf(),
        }),
    }
}

/// Resolve symlinks in `path`, or in its parent when `path` does not exist yet
pub fn resolve_existing(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => match fs::canonicalize(parent) {
            Ok(parent) => parent.join(name),
            Err(_) => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Whether either path contains the other
pub fn is_overlap(source: &Path, dest: &Path) -> bool {
    let source = resolve_existing(source);
    let dest = resolve_existing(dest);
    dest.starts_with(&source) || source.starts_with(&dest)
}
