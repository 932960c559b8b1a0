// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Apply command

use super::Target;
use crate::error::CkError;
use crate::output::{self, OutputFormat};
use ck_persist::ConfigurationPersister;
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

#[derive(clap::Args)]
pub struct ApplyArgs {
    /// File holding the new configuration, or `-` for stdin
    input: String,
}

#[derive(Serialize)]
struct Applied {
    written: PathBuf,
    version: u64,
    backup: Option<PathBuf>,
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {}", self.written.display())?;
        if let Some(backup) = &self.backup {
            write!(f, "\nPrevious version saved as {}", backup.display())?;
        }
        Ok(())
    }
}

pub fn handle(target: &Target, args: ApplyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let content = read_input(&args.input)?;

    let persister = target.persister()?;
    persister.load()?;
    persister.successful_boot()?;

    let mut resource = persister.store(&content)?;
    resource.commit()?;

    let file = persister.configuration_file();
    let version = file.sequence();
    let backup = Some(file.versioned_file(version)).filter(|path| path.exists());
    output::print(
        &Applied {
            written: file.persisted_file(),
            version,
            backup,
        },
        format,
    )
}

fn read_input(input: &str) -> Result<String, CkError> {
    let result = if input == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content).map(|_| content)
    } else {
        std::fs::read_to_string(input)
    };
    result.map_err(|e| {
        let source = if input == "-" { "stdin" } else { input };
        CkError::new(format!("could not read {}: {}", source, e))
            .suggest("Pass a readable file, or - to read the configuration from stdin")
            .caused_by(e)
    })
}
