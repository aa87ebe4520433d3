//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::core::config::{
    BuildCommand, SyncConfig, DEFAULT_BUILD_COMMAND, DEFAULT_EXTENSION, DEFAULT_MARKER,
    DEFAULT_STRIP,
};
use crate::core::paths::resolve_from;
use crate::core::render::{OutputFormat, RenderConfig};

/// gamesync - copy game directories into a target tree, build them and write a manifest.
#[derive(Parser, Debug)]
#[command(name = "gamesync")]
#[command(
    author,
    version,
    about,
    long_about = r#"gamesync finds every directory under SOURCE whose name contains the marker
("game" by default, case-insensitive), copies it into TARGET without the strip
token ("_game" by default), runs the build command on the first code file found
inside, and writes TARGET/metadata.json listing the copied units.

Existing unit directories and metadata.json in TARGET are replaced, not merged.
Per-unit errors are logged to stderr and never stop the run.

A report with one entry per unit is printed to stdout (default: jsonl).

Examples:
    gamesync data games
    gamesync data games --no-build --format md
    gamesync data games --build-cmd "go build -o app"
"#
)]
pub struct Cli {
    /// Directory to search for unit directories.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory the units are copied into.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Substring that marks a directory as a unit.
    #[arg(
        long,
        env = "GAMESYNC_MARKER",
        default_value = DEFAULT_MARKER,
        value_name = "TOKEN",
        long_help = "Substring that marks a directory as a unit. Matching is case-insensitive\n\
and the directory name only needs to contain it."
    )]
    pub marker: String,

    /// Substring removed from unit names.
    #[arg(
        long,
        env = "GAMESYNC_STRIP",
        default_value = DEFAULT_STRIP,
        value_name = "TOKEN",
        long_help = "Substring removed from a unit's directory name to form its name in TARGET.\n\n\
Only the first occurrence is removed, wherever it appears in the name.\n\
Matching is case-sensitive."
    )]
    pub strip: String,

    /// Extension of the file passed to the build command.
    #[arg(
        long,
        env = "GAMESYNC_EXTENSION",
        default_value = DEFAULT_EXTENSION,
        value_name = "EXT"
    )]
    pub extension: String,

    /// Build command run on the first code file of each unit.
    #[arg(
        long,
        env = "GAMESYNC_BUILD_CMD",
        default_value = DEFAULT_BUILD_COMMAND,
        value_name = "CMD",
        long_help = "Build command run inside each copied unit, with the path of the first\n\
code file appended. Split on whitespace; no shell quoting is applied."
    )]
    pub build_cmd: BuildCommand,

    /// Copy units without running the build command.
    #[arg(long)]
    pub no_build: bool,

    /// Report format (jsonl/json/md).
    #[arg(long, default_value = "jsonl", value_name = "FORMAT")]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long)]
    pub pretty: bool,

    /// Disable colored output (when applicable).
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration, resolving paths against the working directory
    pub fn to_config(&self) -> Result<SyncConfig> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;

        let config = SyncConfig {
            source: resolve_from(&cwd, &self.source),
            target: resolve_from(&cwd, &self.target),
            marker: self.marker.clone(),
            strip: self.strip.clone(),
            extension: self.extension.clone(),
            build: if self.no_build {
                None
            } else {
                Some(self.build_cmd.clone())
            },
        };
        config.validate()?;
        Ok(config)
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.to_config()?;
    tracing::debug!("configuration: {:?}", config);

    crate::flows::sync::run_sync(&config, render_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["gamesync", "src", "dst"]).unwrap();
        assert_eq!(cli.marker, "game");
        assert_eq!(cli.strip, "_game");
        assert_eq!(cli.extension, ".go");
        assert_eq!(cli.build_cmd, BuildCommand::default());
        assert!(!cli.no_build);
    }

    #[test]
    fn test_requires_both_positionals() {
        assert!(Cli::try_parse_from(["gamesync", "src"]).is_err());
    }

    #[test]
    fn test_to_config_resolves_relative_paths() {
        let _lock = crate::core::workdir::CWD_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let cli = Cli::try_parse_from(["gamesync", "src", "/abs/dst", "--no-build"]).unwrap();
        let config = cli.to_config().unwrap();

        assert!(config.source.is_absolute());
        assert!(config.source.ends_with("src"));
        assert_eq!(config.target, PathBuf::from("/abs/dst"));
        assert!(config.build.is_none());
    }

    #[test]
    fn test_build_cmd_flag() {
        let cli = Cli::try_parse_from(["gamesync", "a", "b", "--build-cmd", "make -j4"]).unwrap();
        assert_eq!(cli.build_cmd.program, "make");
        assert_eq!(cli.build_cmd.args, vec!["-j4"]);
    }

    #[test]
    fn test_empty_build_cmd_rejected() {
        assert!(Cli::try_parse_from(["gamesync", "a", "b", "--build-cmd", " "]).is_err());
    }

    #[test]
    fn test_empty_marker_rejected() {
        let cli = Cli::try_parse_from(["gamesync", "a", "b", "--marker", ""]).unwrap();
        assert!(cli.to_config().is_err());
    }
}
