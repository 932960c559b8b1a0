// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! History command

use super::Target;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct HistoryArgs {
    /// List archived history directories instead of current versions
    #[arg(long)]
    archives: bool,
}

#[derive(Serialize)]
struct Version {
    version: u64,
    path: PathBuf,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:<6} {}", self.version, self.path.display())
    }
}

#[derive(Serialize)]
struct Archive {
    path: PathBuf,
}

impl fmt::Display for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

pub fn handle(target: &Target, args: HistoryArgs, format: OutputFormat) -> anyhow::Result<()> {
    let file = target.open()?;
    if args.archives {
        let archives: Vec<Archive> = file
            .archives()?
            .into_iter()
            .map(|path| Archive { path })
            .collect();
        output::print_list(&archives, "No archived history", format)
    } else {
        let versions: Vec<Version> = file
            .versions()?
            .into_iter()
            .map(|entry| Version {
                version: entry.version,
                path: entry.path,
            })
            .collect();
        output::print_list(&versions, "No versions", format)
    }
}
