//! Unit materialization
//!
//! Replaces a unit's destination with a fresh copy of its source tree.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::WalkDir;

use crate::core::error::{SyncError, SyncResult};
use crate::core::paths::is_overlap;

/// Summary of one tree copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub dirs: usize,
    pub files: usize,
}

/// Ensure `dir` exists, creating missing parents
pub fn ensure_dir(dir: &Path) -> SyncResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| SyncError::io("create directory", dir, e))?;
    }
    Ok(())
}

/// Remove whatever sits at `path`, if anything
fn remove_existing(path: &Path) -> SyncResult<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(SyncError::io("inspect", path, e)),
    };

    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(|e| SyncError::io("remove directory", path, e))
    } else {
        fs::remove_file(path).map_err(|e| SyncError::io("remove file", path, e))
    }
}

/// Copy `source` to `dest`, replacing any previous contents of `dest`.
///
/// Symlinks inside the source are followed. A failure part way through leaves
/// the partial copy in place. Nothing is touched when one path contains the
/// other.
pub fn copy_and_overwrite(source: &Path, dest: &Path) -> SyncResult<CopyStats> {
    if let Some(parent) = dest.parent() {
        ensure_dir(parent)?;
    }
    if is_overlap(source, dest) {
        return Err(SyncError::Overlap {
            source_dir: source.to_path_buf(),
            destination: dest.to_path_buf(),
        });
    }
    remove_existing(dest)?;

    let mut stats = CopyStats::default();

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| SyncError::Walk {
            path: e.path().unwrap_or(source).to_path_buf(),
            source: e,
        })?;

        let relative = match entry.path().strip_prefix(source) {
            Ok(r) => r,
            Err(_) => continue,
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| SyncError::io("create directory", &target, e))?;
            stats.dirs += 1;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| SyncError::io("copy file", entry.path(), e))?;
            stats.files += 1;
        }
    }

    tracing::debug!(
        "copied '{}' to '{}' ({} dirs, {} files)",
        source.display(),
        dest.display(),
        stats.dirs,
        stats.files
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_copy_tree() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src/beta_game");
        write_file(&src.join("main.go"), "package main");
        write_file(&src.join("assets/sprite.txt"), "sprite");

        let dest = temp.path().join("dst/beta");
        let stats = copy_and_overwrite(&src, &dest).unwrap();

        assert_eq!(stats, CopyStats { dirs: 2, files: 2 });
        assert_eq!(fs::read_to_string(dest.join("main.go")).unwrap(), "package main");
        assert_eq!(
            fs::read_to_string(dest.join("assets/sprite.txt")).unwrap(),
            "sprite"
        );
    }

    #[test]
    fn test_copy_replaces_previous_contents() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("alpha_game");
        write_file(&src.join("new.txt"), "new");

        let dest = temp.path().join("out/alpha");
        write_file(&dest.join("stale.txt"), "stale");

        copy_and_overwrite(&src, &dest).unwrap();

        assert!(dest.join("new.txt").exists());
        assert!(!dest.join("stale.txt").exists());
    }

    #[test]
    fn test_copy_replaces_file_at_destination() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("alpha_game");
        write_file(&src.join("readme.txt"), "hi");

        let dest = temp.path().join("alpha");
        write_file(&dest, "not a directory");

        copy_and_overwrite(&src, &dest).unwrap();
        assert!(dest.join("readme.txt").is_file());
    }

    #[test]
    fn test_copy_empty_dir() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("empty_game");
        fs::create_dir(&src).unwrap();

        let dest = temp.path().join("deep/nested/empty");
        let stats = copy_and_overwrite(&src, &dest).unwrap();

        assert!(dest.is_dir());
        assert_eq!(stats.files, 0);
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = tempdir().unwrap();
        let result = copy_and_overwrite(&temp.path().join("gone_game"), &temp.path().join("gone"));
        assert!(matches!(result, Err(SyncError::Walk { .. })));
    }

    #[test]
    fn test_copy_into_own_subtree_rejected() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("games");
        write_file(&src.join("alpha/a.txt"), "a");

        let result = copy_and_overwrite(&src, &src.join("games"));

        assert!(matches!(result, Err(SyncError::Overlap { .. })));
        assert!(!src.join("games").exists());
        assert!(src.join("alpha/a.txt").is_file());
    }

    #[test]
    fn test_copy_over_own_ancestor_rejected() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("out/nested_game");
        write_file(&src.join("a.txt"), "a");

        let result = copy_and_overwrite(&src, &temp.path().join("out"));

        assert!(matches!(result, Err(SyncError::Overlap { .. })));
        assert!(src.join("a.txt").is_file());
    }

    #[test]
    fn test_remove_existing_missing_path() {
        let temp = tempdir().unwrap();
        assert!(remove_existing(&temp.path().join("absent")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_existing_reports_inspect_errors() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain.txt");
        write_file(&file, "data");

        // a path below a regular file fails with ENOTDIR, not NotFound
        let result = remove_existing(&file.join("child"));

        assert!(matches!(
            result,
            Err(SyncError::Io {
                action: "inspect",
                ..
            })
        ));
        assert!(file.is_file());
    }

    #[test]
    fn test_ensure_dir() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("a/b/c");
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_dir(&dir).unwrap();
    }
}
