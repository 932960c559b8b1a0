// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{load_file, ConfigurationPersister};
use crate::marshal::ConfigurationMarshaller;
use crate::resource::{FilePersistenceResource, PersistenceResource};
use ck_core::{DeferredDeletes, PersistenceError};
use std::path::{Path, PathBuf};

/// Persists to a single file with no history or snapshots
#[derive(Debug)]
pub struct FileConfigurationPersister<M> {
    file: PathBuf,
    marshaller: M,
    deferred: DeferredDeletes,
}

impl<M: ConfigurationMarshaller> FileConfigurationPersister<M> {
    pub fn new(file: impl Into<PathBuf>, marshaller: M) -> Self {
        Self {
            file: file.into(),
            marshaller,
            deferred: DeferredDeletes::new(),
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl<M> ConfigurationPersister for FileConfigurationPersister<M>
where
    M: ConfigurationMarshaller,
{
    type Model = M::Model;
    type Operation = M::Operation;

    fn store(&self, model: &M::Model) -> Result<Box<dyn PersistenceResource>, PersistenceError> {
        Ok(Box::new(FilePersistenceResource::new(
            &self.marshaller,
            model,
            &self.file,
            self.deferred.clone(),
        )?))
    }

    fn load(&self) -> Result<Vec<M::Operation>, PersistenceError> {
        load_file(&self.marshaller, &self.file)
    }
}
