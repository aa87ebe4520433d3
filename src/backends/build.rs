//! Build step
//!
//! Looks for the first code file inside a copied unit and runs the external
//! build command on it, with the unit's destination as working directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use walkdir::WalkDir;

use crate::core::config::BuildCommand;
use crate::core::error::{SyncError, SyncResult};
use crate::core::workdir::WorkdirGuard;

/// How the build step ended for one unit
#[derive(Debug)]
pub enum BuildStatus {
    /// The command exited successfully
    Compiled {
        file: PathBuf,
        stdout: String,
        stderr: String,
    },

    /// The command could not be started or exited unsuccessfully
    Failed { file: PathBuf, error: SyncError },

    /// No file with the code extension was found
    Skipped,
}

/// Find the first file under `dir` whose name ends with `extension`.
///
/// "First" is walk order. The returned path is relative to `dir`.
pub fn find_code_file(dir: &Path, extension: &str) -> SyncResult<Option<PathBuf>> {
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| SyncError::Walk {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(extension) {
            let relative = entry
                .path()
                .strip_prefix(dir)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
            return Ok(Some(relative));
        }
    }
    Ok(None)
}

/// Captured output of a successful build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `command` with `file` appended, inside `cwd`.
///
/// Returns captured stdout and stderr on success.
pub fn run_build(command: &BuildCommand, cwd: &Path, file: &Path) -> SyncResult<BuildOutput> {
    let display = format!("{} {}", command, file.display());
    let _guard = WorkdirGuard::enter(cwd)?;

    let output = Command::new(&command.program)
        .args(&command.args)
        .arg(file)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| SyncError::Spawn {
            command: display.clone(),
            cwd: cwd.to_path_buf(),
            source: e,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if output.status.success() {
        Ok(BuildOutput { stdout, stderr })
    } else {
        Err(SyncError::BuildFailed {
            command: display,
            cwd: cwd.to_path_buf(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        })
    }
}

/// Locate and build the code file of one copied unit.
///
/// Only a failed search is an `Err`; build failures are reported as
/// `BuildStatus::Failed` so the caller still learns which file was tried.
pub fn compile_unit(
    dest: &Path,
    extension: &str,
    command: &BuildCommand,
) -> SyncResult<BuildStatus> {
    let Some(file) = find_code_file(dest, extension)? else {
        return Ok(BuildStatus::Skipped);
    };

    match run_build(command, dest, &file) {
        Ok(BuildOutput { stdout, stderr }) => Ok(BuildStatus::Compiled {
            file,
            stdout,
            stderr,
        }),
        Err(error) => Ok(BuildStatus::Failed { file, error }),
    }
}
