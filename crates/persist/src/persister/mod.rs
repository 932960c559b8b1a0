// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisters bind a marshaller to where configuration is stored
//!
//! - **File**: one file rewritten in place, no history
//! - **Backup**: a [`ConfigurationFile`](ck_core::ConfigurationFile) with versioned history
//! - **Transient**: boots from history but never writes
//! - **Null**: loads nothing and writes nothing

mod backup;
mod file;
mod null;
mod transient;




pub use backup::BackupConfigurationPersister;
pub use file::FileConfigurationPersister;
pub use null::NullConfigurationPersister;
pub use transient::TransientConfigurationPersister;

use crate::marshal::ConfigurationMarshaller;
use crate::resource::PersistenceResource;
use ck_core::{PersistenceError, SnapshotInfo};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Stores and loads a configuration model
pub trait ConfigurationPersister: Send + Sync {
    type Model;
    type Operation;

    /// Marshal `model` now; the returned resource writes it on commit
    fn store(&self, model: &Self::Model) -> Result<Box<dyn PersistenceResource>, PersistenceError>;

    /// Read the boot configuration as a list of operations
    fn load(&self) -> Result<Vec<Self::Operation>, PersistenceError>;

    /// Called once the configuration loaded by [`load`](Self::load) booted
    fn successful_boot(&self) -> Result<(), PersistenceError> {
        Ok(())
    }

    /// Copy the current configuration to a new snapshot and return its path
    fn snapshot(&self) -> Result<PathBuf, PersistenceError> {
        Err(PersistenceError::SnapshotsUnsupported)
    }

    fn list_snapshots(&self) -> Result<SnapshotInfo, PersistenceError> {
        Ok(SnapshotInfo::empty())
    }

    /// Delete the snapshot starting with `name`, or all of them for `all`
    fn delete_snapshot(&self, _name: &str) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Unmarshal the operations stored in `path`
fn load_file<M: ConfigurationMarshaller>(
    marshaller: &M,
    path: &Path,
) -> Result<Vec<M::Operation>, PersistenceError> {
    let file = File::open(path).map_err(|e| PersistenceError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let operations = marshaller
        .unmarshal(&mut BufReader::new(file))
        .map_err(|source| PersistenceError::Load {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), operations = operations.len(), "loaded configuration");
    Ok(operations)
}
