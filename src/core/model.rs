//! Run model
//!
//! Units flow through the pipeline; each one ends in a `UnitOutcome`. The
//! collected `UnitReport`s form the `RunReport` printed at the end of a run.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::PathBuf;

/// A discovered directory and the name it is copied under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Absolute source path
    pub source: PathBuf,

    /// Normalized destination directory name, exactly as on disk
    pub dir_name: OsString,

    /// `dir_name` as listed in the manifest and report
    pub name: String,
}

impl Unit {
    pub fn new(source: PathBuf, dir_name: OsString) -> Self {
        let name = dir_name.to_string_lossy().into_owned();
        Self {
            source,
            dir_name,
            name,
        }
    }

    /// Whether `name` had to replace invalid UTF-8 in `dir_name`
    pub fn is_lossy(&self) -> bool {
        self.dir_name.to_str().is_none()
    }
}

/// Terminal state of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitOutcome {
    Compiled,
    CompileSkipped,
    CompileFailed,
    CopyFailed,
}

impl UnitOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitOutcome::Compiled => "compiled",
            UnitOutcome::CompileSkipped => "compile-skipped",
            UnitOutcome::CompileFailed => "compile-failed",
            UnitOutcome::CopyFailed => "copy-failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnitOutcome::CompileFailed | UnitOutcome::CopyFailed)
    }
}

/// What happened to one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitReport {
    pub name: String,
    pub source: String,
    pub destination: String,
    pub outcome: UnitOutcome,

    /// File handed to the build command, relative to the destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a whole run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub units: Vec<UnitReport>,

    /// Where the manifest was (or should have been) written
    pub manifest: String,

    pub manifest_written: bool,
}

impl RunReport {
    pub fn push(&mut self, report: UnitReport) {
        self.units.push(report);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Count units that ended in the given outcome
    pub fn count(&self, outcome: UnitOutcome) -> usize {
        self.units.iter().filter(|u| u.outcome == outcome).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, outcome: UnitOutcome) -> UnitReport {
        UnitReport {
            name: name.to_string(),
            source: format!("/src/{}_game", name),
            destination: format!("/dst/{}", name),
            outcome,
            build_file: None,
            message: None,
        }
    }

    #[test]
    fn test_outcome_serializes_kebab_case() {
        let json = serde_json::to_string(&UnitOutcome::CompileSkipped).unwrap();
        assert_eq!(json, "\"compile-skipped\"");
        assert_eq!(UnitOutcome::CompileSkipped.as_str(), "compile-skipped");
    }

    #[test]
    fn test_report_counts() {
        let mut run = RunReport::default();
        run.push(report("alpha", UnitOutcome::CompileSkipped));
        run.push(report("beta", UnitOutcome::Compiled));
        run.push(report("gamma", UnitOutcome::CompileSkipped));

        assert_eq!(run.len(), 3);
        assert_eq!(run.count(UnitOutcome::CompileSkipped), 2);
        assert_eq!(run.count(UnitOutcome::CompileFailed), 0);
    }

    #[test]
    fn test_unit_report_omits_empty_fields() {
        let json = serde_json::to_string(&report("alpha", UnitOutcome::Compiled)).unwrap();
        assert!(!json.contains("build_file"));
        assert!(!json.contains("message"));
    }
}
