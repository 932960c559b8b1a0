// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot commands

use super::Target;
use crate::output::{self, OutputFormat};
use ck_core::SnapshotInfo;
use ck_persist::ConfigurationPersister;
use clap::Subcommand;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct SnapshotArgs {
    #[command(subcommand)]
    pub command: SnapshotCommand,
}

#[derive(Subcommand)]
pub enum SnapshotCommand {
    /// Copy the current configuration into the snapshot directory
    Take,
    /// List snapshots
    List,
    /// Delete the snapshot starting with NAME, or every snapshot for `all`
    Delete {
        /// Snapshot name or unique prefix
        name: String,
    },
}

#[derive(Serialize)]
struct Taken {
    snapshot: PathBuf,
}

impl fmt::Display for Taken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Took snapshot {}", self.snapshot.display())
    }
}

#[derive(Serialize)]
struct Listing(SnapshotInfo);

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "No snapshots");
        }
        write!(f, "{}", self.0.directory().display())?;
        for name in self.0.names() {
            write!(f, "\n  {}", name)?;
        }
        Ok(())
    }
}

pub fn handle(target: &Target, command: SnapshotCommand, format: OutputFormat) -> anyhow::Result<()> {
    let persister = target.persister()?;
    match command {
        SnapshotCommand::Take => {
            let snapshot = persister.snapshot()?;
            output::print(&Taken { snapshot }, format)?;
        }
        SnapshotCommand::List => {
            output::print(&Listing(persister.list_snapshots()?), format)?;
        }
        SnapshotCommand::Delete { name } => {
            persister.delete_snapshot(&name)?;
            if format == OutputFormat::Text {
                println!("Deleted {}", name);
            }
        }
    }
    Ok(())
}
