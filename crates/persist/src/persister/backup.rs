// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{load_file, ConfigurationPersister};
use crate::marshal::ConfigurationMarshaller;
use crate::resource::{ConfigurationFilePersistenceResource, NullPersistenceResource, PersistenceResource};
use ck_core::{Clock, ConfigurationFile, PersistenceError, SnapshotInfo, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

/// Persists through a [`ConfigurationFile`], keeping versioned history
///
/// Stores before [`successful_boot`](ConfigurationPersister::successful_boot)
/// are dropped so a half-booted model is never written.
pub struct BackupConfigurationPersister<M, C: Clock = SystemClock> {
    file: Arc<ConfigurationFile<C>>,
    marshaller: M,
}

impl<M: ConfigurationMarshaller, C: Clock> BackupConfigurationPersister<M, C> {
    pub fn new(file: Arc<ConfigurationFile<C>>, marshaller: M) -> Self {
        Self { file, marshaller }
    }

    pub fn configuration_file(&self) -> &Arc<ConfigurationFile<C>> {
        &self.file
    }
}

impl<M, C> ConfigurationPersister for BackupConfigurationPersister<M, C>
where
    M: ConfigurationMarshaller,
    C: Clock,
{
    type Model = M::Model;
    type Operation = M::Operation;

    fn store(&self, model: &M::Model) -> Result<Box<dyn PersistenceResource>, PersistenceError> {
        if !self.file.is_booted() {
            tracing::debug!("not booted, configuration change will not be persisted");
            return Ok(Box::new(NullPersistenceResource));
        }
        Ok(Box::new(ConfigurationFilePersistenceResource::new(
            &self.marshaller,
            model,
            Arc::clone(&self.file),
        )?))
    }

    fn load(&self) -> Result<Vec<M::Operation>, PersistenceError> {
        load_file(&self.marshaller, &self.file.boot_file()?)
    }

    fn successful_boot(&self) -> Result<(), PersistenceError> {
        self.file.successful_boot()
    }

    fn snapshot(&self) -> Result<PathBuf, PersistenceError> {
        self.file.snapshot()
    }

    fn list_snapshots(&self) -> Result<SnapshotInfo, PersistenceError> {
        self.file.list_snapshots()
    }

    fn delete_snapshot(&self, name: &str) -> Result<(), PersistenceError> {
        self.file.delete_snapshot(name)
    }
}
