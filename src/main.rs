//! gamesync - copy game directories into a target tree, build them, and
//! summarize the result in metadata.json
//!
//! A run is one sequential pass:
//! - Discover directories whose name contains the marker
//! - Copy each under its normalized name, replacing earlier copies
//! - Build the first code file found in each copy
//! - Write the manifest and print a per-unit report

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod backends;
mod cli;
mod core;
mod flows;
mod manifest;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(&cli);

    cli::run(cli)
}

fn init_logging(cli: &cli::Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("gamesync={}", level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(!cli.no_color)
                .with_writer(std::io::stderr),
        )
        .init();
}
