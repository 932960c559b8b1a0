// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod apply;
pub mod boot;
pub mod history;
pub mod resolve;
pub mod snapshot;

use ck_core::{ConfigurationFile, ConfigurationFileOptions, HistoryConfig, PersistenceError};
use ck_persist::{BackupConfigurationPersister, TextMarshaller};
use std::path::PathBuf;
use std::sync::Arc;

pub type Persister = BackupConfigurationPersister<TextMarshaller>;

/// The configuration file selected by the global flags
pub struct Target {
    pub dir: PathBuf,
    pub file: String,
    pub boot: Option<String>,
    pub read_only: bool,
    pub history: HistoryConfig,
}

impl Target {
    pub fn open(&self) -> Result<Arc<ConfigurationFile>, PersistenceError> {
        let mut options = ConfigurationFileOptions::new(&self.dir, self.file.as_str())
            .persist_original(!self.read_only)
            .history(self.history);
        if let Some(boot) = &self.boot {
            options = options.boot_name(boot.as_str());
        }
        Ok(Arc::new(ConfigurationFile::open(options)?))
    }

    pub fn persister(&self) -> Result<Persister, PersistenceError> {
        Ok(BackupConfigurationPersister::new(self.open()?, TextMarshaller))
    }
}
