// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ck - configuration keeper
//!
//! Boots, rewrites and snapshots one configuration file while keeping its
//! versioned history beside it.

mod commands;
mod error;
mod output;

use anyhow::Result;
use ck_core::HistoryConfig;
use clap::{Parser, Subcommand};
use commands::{apply, boot, history, resolve, snapshot, Target};
use error::CkError;
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "ck",
    version,
    about = "Configuration keeper - versioned history and snapshots for a configuration file"
)]
struct Cli {
    /// Configuration directory
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Name of the main configuration file
    #[arg(long, global = true, default_value = "standalone.xml")]
    file: String,

    /// Boot from a marker (initial, boot, last), a version (v1, v2, ...),
    /// a snapshot prefix or another file
    #[arg(long, global = true)]
    boot: Option<String>,

    /// Leave the main file untouched and write changes to the history only
    #[arg(long, global = true)]
    read_only: bool,

    /// Settings file with a [history] section
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which files the main and boot names resolve to
    Resolve,
    /// Mark the configuration as booted, seeding and rotating history
    Boot,
    /// Boot, then store new configuration content
    Apply(apply::ApplyArgs),
    /// Snapshot management
    Snapshot(snapshot::SnapshotArgs),
    /// List versions kept in the current history
    History(history::HistoryArgs),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", error::render(e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let history = HistoryConfig::load(cli.config.as_deref()).map_err(CkError::from)?;
    let target = Target {
        dir: cli.dir,
        file: cli.file,
        boot: cli.boot,
        read_only: cli.read_only,
        history,
    };

    match cli.command {
        Commands::Resolve => resolve::handle(&target, cli.format),
        Commands::Boot => boot::handle(&target, cli.format),
        Commands::Apply(args) => apply::handle(&target, args, cli.format),
        Commands::Snapshot(args) => snapshot::handle(&target, args.command, cli.format),
        Commands::History(args) => history::handle(&target, args, cli.format),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default)
fn init_tracing() {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .init();
}
