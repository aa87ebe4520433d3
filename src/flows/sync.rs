//! Sync flow - The whole run, stage by stage
//!
//! Steps:
//! 1. Discover unit directories under the source root
//! 2. Normalize their names
//! 3. Copy each unit into the target root and build its code
//! 4. Write metadata.json listing every unit
//!
//! Stages run sequentially and each consumes the previous one in full. Errors
//! are logged where they happen; a failing unit never stops the run.

use anyhow::Result;
use std::io;

use crate::backends::build::{compile_unit, BuildStatus};
use crate::backends::copy::{copy_and_overwrite, ensure_dir};
use crate::backends::discover::discover_units;
use crate::core::config::SyncConfig;
use crate::core::model::{RunReport, Unit, UnitOutcome, UnitReport};
use crate::core::naming::normalize_name;
use crate::core::paths::{normalize_path, unit_destination};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{clip_message, command_exists};
use crate::manifest::meta::Manifest;
use crate::manifest::store::write_manifest;

/// Run the sync flow and print its report
pub fn run_sync(config: &SyncConfig, render: RenderConfig) -> Result<()> {
    let report = sync(config);

    let renderer = Renderer::with_config(render);
    renderer.render_to(&report, io::stdout().lock())?;

    Ok(())
}

/// Discover units under `config.source` and materialize them into `config.target`
pub fn sync(config: &SyncConfig) -> RunReport {
    let units = discover(config);
    tracing::info!(
        "found {} unit(s) under '{}'",
        units.len(),
        config.source.display()
    );

    if let Some(build) = &config.build {
        if !build.program.contains('/') && !command_exists(&build.program) {
            tracing::warn!(
                "build program '{}' not found in PATH; builds will fail",
                build.program
            );
        }
    }

    if let Err(e) = ensure_dir(&config.target) {
        tracing::error!("{}", e);
    }

    let manifest_path = config.manifest_path();
    let mut report = RunReport {
        manifest: normalize_path(&manifest_path),
        ..Default::default()
    };

    for unit in &units {
        report.push(materialize(unit, config));
    }

    let manifest = Manifest::new(units.into_iter().map(|u| u.name).collect());
    match write_manifest(&manifest_path, &manifest) {
        Ok(()) => report.manifest_written = true,
        Err(e) => tracing::error!("{}", e),
    }

    tracing::info!(
        "{} unit(s): {} compiled, {} skipped, {} build failure(s), {} copy failure(s)",
        report.len(),
        report.count(UnitOutcome::Compiled),
        report.count(UnitOutcome::CompileSkipped),
        report.count(UnitOutcome::CompileFailed),
        report.count(UnitOutcome::CopyFailed)
    );

    report
}

/// Stages 1 and 2: find unit directories and name them
pub fn discover(config: &SyncConfig) -> Vec<Unit> {
    let discovery = discover_units(&config.source, &config.marker);
    if let Some(e) = &discovery.error {
        tracing::warn!(
            "error finding unit directories, keeping {} found so far: {}",
            discovery.paths.len(),
            e
        );
    }

    discovery
        .paths
        .into_iter()
        .map(|source| {
            let unit = Unit::new(source.clone(), normalize_name(&source, &config.strip));
            if unit.is_lossy() {
                tracing::warn!(
                    "unit '{}' has a name that is not valid UTF-8; listed as '{}'",
                    source.display(),
                    unit.name
                );
            }
            unit
        })
        .collect()
}

/// Stage 3 for one unit: copy, then build
fn materialize(unit: &Unit, config: &SyncConfig) -> UnitReport {
    let mut report = UnitReport {
        name: unit.name.clone(),
        source: normalize_path(&unit.source),
        destination: normalize_path(&config.target.join(&unit.dir_name)),
        outcome: UnitOutcome::CompileSkipped,
        build_file: None,
        message: None,
    };

    let dest = match unit_destination(&config.target, &unit.dir_name) {
        Ok(dest) => dest,
        Err(e) => {
            tracing::error!("error copying '{}': {}", unit.source.display(), e);
            report.outcome = UnitOutcome::CopyFailed;
            report.message = Some(clip_message(&e.to_string()));
            return report;
        }
    };

    if let Err(e) = copy_and_overwrite(&unit.source, &dest) {
        tracing::error!("error copying '{}': {}", unit.source.display(), e);
        report.outcome = UnitOutcome::CopyFailed;
        report.message = Some(clip_message(&e.to_string()));
        return report;
    }

    let Some(build) = &config.build else {
        tracing::debug!("build disabled, skipping '{}'", dest.display());
        report.message = Some("build disabled".to_string());
        return report;
    };

    match compile_unit(&dest, &config.extension, build) {
        Ok(BuildStatus::Compiled {
            file,
            stdout,
            stderr,
        }) => {
            tracing::info!(
                "compile result in '{}': {}",
                dest.display(),
                stdout.trim()
            );
            if !stderr.trim().is_empty() {
                tracing::warn!(
                    "compile diagnostics in '{}': {}",
                    dest.display(),
                    stderr.trim()
                );
            }
            report.outcome = UnitOutcome::Compiled;
            report.build_file = Some(normalize_path(&file));
        }
        Ok(BuildStatus::Failed { file, error }) => {
            tracing::error!("error compiling code in '{}': {}", dest.display(), error);
            report.outcome = UnitOutcome::CompileFailed;
            report.build_file = Some(normalize_path(&file));
            report.message = Some(clip_message(&error.to_string()));
        }
        Ok(BuildStatus::Skipped) => {
            tracing::info!(
                "no code file with extension '{}' found in '{}', skipping compilation",
                config.extension,
                dest.display()
            );
        }
        Err(e) => {
            tracing::error!("error compiling code in '{}': {}", dest.display(), e);
            report.outcome = UnitOutcome::CompileFailed;
            report.message = Some(clip_message(&e.to_string()));
        }
    }

    report
}
