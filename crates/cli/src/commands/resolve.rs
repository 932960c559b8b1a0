// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve command

use super::Target;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize)]
struct Resolution {
    main_file: PathBuf,
    boot_file: PathBuf,
    persisted_file: PathBuf,
    history_dir: PathBuf,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "main:      {}", self.main_file.display())?;
        writeln!(f, "boot:      {}", self.boot_file.display())?;
        writeln!(f, "persisted: {}", self.persisted_file.display())?;
        write!(f, "history:   {}", self.history_dir.display())
    }
}

pub fn handle(target: &Target, format: OutputFormat) -> anyhow::Result<()> {
    let file = target.open()?;
    let resolution = Resolution {
        main_file: file.main_file().to_path_buf(),
        boot_file: file.boot_file()?,
        persisted_file: file.persisted_file(),
        history_dir: file.history_root().to_path_buf(),
    };
    output::print(&resolution, format)
}
