// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::ConfigurationPersister;
use crate::resource::{NullPersistenceResource, PersistenceResource};
use ck_core::PersistenceError;
use std::fmt;
use std::marker::PhantomData;

/// Loads an empty configuration and discards every store
pub struct NullConfigurationPersister<Model = String, Operation = String> {
    _types: PhantomData<fn() -> (Model, Operation)>,
}

impl<Model, Operation> NullConfigurationPersister<Model, Operation> {
    pub fn new() -> Self {
        Self {
            _types: PhantomData,
        }
    }
}

impl<Model, Operation> Default for NullConfigurationPersister<Model, Operation> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Model, Operation> fmt::Debug for NullConfigurationPersister<Model, Operation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NullConfigurationPersister")
    }
}

impl<Model, Operation> ConfigurationPersister for NullConfigurationPersister<Model, Operation> {
    type Model = Model;
    type Operation = Operation;

    fn store(&self, _model: &Model) -> Result<Box<dyn PersistenceResource>, PersistenceError> {
        Ok(Box::new(NullPersistenceResource))
    }

    fn load(&self) -> Result<Vec<Operation>, PersistenceError> {
        Ok(Vec::new())
    }
}
