// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boot command

use super::Target;
use crate::output::{self, OutputFormat};
use ck_core::Marker;
use ck_persist::ConfigurationPersister;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize)]
struct Booted {
    boot_file: PathBuf,
    operations: usize,
    last: PathBuf,
}

impl fmt::Display for Booted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Booted from {} ({} operations)",
            self.boot_file.display(),
            self.operations
        )
    }
}

pub fn handle(target: &Target, format: OutputFormat) -> anyhow::Result<()> {
    let persister = target.persister()?;
    let operations = persister.load()?;
    persister.successful_boot()?;

    let file = persister.configuration_file();
    let booted = Booted {
        boot_file: file.boot_file()?,
        operations: operations.len(),
        last: file.marker_file(Marker::Last),
    };
    output::print(&booted, format)
}
