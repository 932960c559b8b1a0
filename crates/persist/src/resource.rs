// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-phase handles for a pending configuration write
//!
//! A resource is created holding the already-marshalled model. Nothing
//! reaches the disk until `commit`; `rollback` drops the bytes.

use crate::marshal::{marshal_to_vec, ConfigurationMarshaller};
use ck_core::file_ops::{self, DeferredDeletes};
use ck_core::{Clock, ConfigurationFile, PersistenceError, SystemClock};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A configuration write that can be made durable or abandoned
pub trait PersistenceResource: Send {
    /// Durably write the marshalled model
    fn commit(&mut self) -> Result<(), PersistenceError>;

    /// Discard the marshalled model; calling it again does nothing
    fn rollback(&mut self);
}

/// Marshalled bytes, gone once rolled back
#[derive(Debug)]
struct Marshalled {
    buffer: Option<Vec<u8>>,
}

impl Marshalled {
    fn new<M: ConfigurationMarshaller>(marshaller: &M, model: &M::Model) -> Result<Self, PersistenceError> {
        Ok(Self {
            buffer: Some(marshal_to_vec(marshaller, model)?),
        })
    }

    fn bytes(&self) -> Result<&[u8], PersistenceError> {
        self.buffer
            .as_deref()
            .ok_or(PersistenceError::RollbackAlreadyInvoked)
    }

    fn discard(&mut self) {
        self.buffer = None;
    }
}

/// A resource whose commit and rollback do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPersistenceResource;

impl PersistenceResource for NullPersistenceResource {
    fn commit(&mut self) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn rollback(&mut self) {}
}

/// Writes a single file through a temp file beside it
#[derive(Debug)]
pub struct FilePersistenceResource {
    marshalled: Marshalled,
    file: PathBuf,
    deferred: DeferredDeletes,
}

impl FilePersistenceResource {
    pub fn new<M: ConfigurationMarshaller>(
        marshaller: &M,
        model: &M::Model,
        file: impl Into<PathBuf>,
        deferred: DeferredDeletes,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            marshalled: Marshalled::new(marshaller, model)?,
            file: file.into(),
            deferred,
        })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl PersistenceResource for FilePersistenceResource {
    fn commit(&mut self) -> Result<(), PersistenceError> {
        let bytes = self.marshalled.bytes()?;
        let temp = file_ops::temp_file_for(&self.file);
        let result = file_ops::write_to_temp_file(bytes, &temp, &self.deferred)
            .and_then(|()| file_ops::move_temp_file_to_main(&temp, &self.file, &self.deferred));
        if let Err(e) = &result {
            tracing::warn!(file = %self.file.display(), error = %e, "failed to persist configuration");
            if let Err(e) = file_ops::delete_file(&temp, &self.deferred) {
                tracing::debug!(error = %e, "temp file left behind");
            }
        }
        result
    }

    fn rollback(&mut self) {
        self.marshalled.discard();
    }
}

/// Writes through a [`ConfigurationFile`], backing up the previous version
pub struct ConfigurationFilePersistenceResource<C: Clock = SystemClock> {
    marshalled: Marshalled,
    file: Arc<ConfigurationFile<C>>,
}

impl<C: Clock> ConfigurationFilePersistenceResource<C> {
    pub fn new<M: ConfigurationMarshaller>(
        marshaller: &M,
        model: &M::Model,
        file: Arc<ConfigurationFile<C>>,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            marshalled: Marshalled::new(marshaller, model)?,
            file,
        })
    }

    fn write_and_commit(&self, bytes: &[u8], temp: &Path) -> Result<(), PersistenceError> {
        if let Err(e) = file_ops::write_to_temp_file(bytes, temp, self.file.deferred_deletes()) {
            tracing::warn!(temp = %temp.display(), error = %e, "failed to write configuration");
            return Err(e);
        }

        let backup = self.file.backup();
        // the new configuration lands even when the backup failed
        let landed = self.file.commit_temp_file(temp);
        if let Err(e) = &backup {
            tracing::warn!(error = %e, "failed to back up previous configuration");
        }
        landed?;
        backup?;
        self.file.file_written()
    }
}

impl<C: Clock> PersistenceResource for ConfigurationFilePersistenceResource<C> {
    fn commit(&mut self) -> Result<(), PersistenceError> {
        let bytes = self.marshalled.bytes()?;
        let temp = file_ops::temp_file_for(self.file.main_file());
        let result = self.write_and_commit(bytes, &temp);
        if let Err(e) = file_ops::delete_file(&temp, self.file.deferred_deletes()) {
            tracing::debug!(error = %e, "temp file left behind");
        }
        result
    }

    fn rollback(&mut self) {
        self.marshalled.discard();
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
