// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{BackupConfigurationPersister, ConfigurationPersister};
use crate::marshal::ConfigurationMarshaller;
use crate::resource::{NullPersistenceResource, PersistenceResource};
use ck_core::{Clock, ConfigurationFile, PersistenceError, SnapshotInfo, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

/// Boots and snapshots like [`BackupConfigurationPersister`] but never stores
pub struct TransientConfigurationPersister<M, C: Clock = SystemClock> {
    inner: BackupConfigurationPersister<M, C>,
}

impl<M: ConfigurationMarshaller, C: Clock> TransientConfigurationPersister<M, C> {
    pub fn new(file: Arc<ConfigurationFile<C>>, marshaller: M) -> Self {
        Self {
            inner: BackupConfigurationPersister::new(file, marshaller),
        }
    }
}

impl<M, C> ConfigurationPersister for TransientConfigurationPersister<M, C>
where
    M: ConfigurationMarshaller,
    C: Clock,
{
    type Model = M::Model;
    type Operation = M::Operation;

    fn store(&self, _model: &M::Model) -> Result<Box<dyn PersistenceResource>, PersistenceError> {
        Ok(Box::new(NullPersistenceResource))
    }

    fn load(&self) -> Result<Vec<M::Operation>, PersistenceError> {
        self.inner.load()
    }

    fn successful_boot(&self) -> Result<(), PersistenceError> {
        self.inner.successful_boot()
    }

    fn snapshot(&self) -> Result<PathBuf, PersistenceError> {
        self.inner.snapshot()
    }

    fn list_snapshots(&self) -> Result<SnapshotInfo, PersistenceError> {
        self.inner.list_snapshots()
    }

    fn delete_snapshot(&self, name: &str) -> Result<(), PersistenceError> {
        self.inner.delete_snapshot(name)
    }
}
