// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-triggered snapshots of the main file

use super::{entry_names, ConfigurationFile};
use crate::clock::Clock;
use crate::error::PersistenceError;
use crate::file_ops;
use crate::naming::{self, ALL_SNAPSHOTS};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Snapshot names found in a snapshot directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotInfo {
    directory: PathBuf,
    names: Vec<String>,
}

impl SnapshotInfo {
    pub fn new(directory: impl Into<PathBuf>, names: Vec<String>) -> Self {
        Self {
            directory: directory.into(),
            names,
        }
    }

    /// No directory and no snapshots
    pub fn empty() -> Self {
        Self::new(PathBuf::new(), Vec::new())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<C: Clock> ConfigurationFile<C> {
    /// Copy the main file into the snapshot directory under a timestamped name
    pub fn snapshot(&self) -> Result<PathBuf, PersistenceError> {
        let dir = &self.layout.snapshots_dir;
        file_ops::ensure_directory(dir)?;

        let name = format!("{}{}", naming::timestamp(&self.clock.now()), self.main_file_name);
        let target = dir.join(name);
        file_ops::copy_file(&self.main_file, &target).map_err(|source| {
            PersistenceError::Snapshot {
                main: self.main_file.clone(),
                snapshot: target.clone(),
                source,
            }
        })?;

        tracing::info!(snapshot = %target.display(), "took snapshot");
        Ok(target)
    }

    /// Snapshots in the snapshot directory, in name (and so time) order
    pub fn list_snapshots(&self) -> Result<SnapshotInfo, PersistenceError> {
        let dir = &self.layout.snapshots_dir;
        let names = entry_names(dir)?
            .into_iter()
            .filter(|name| naming::is_snapshot_name(name))
            .collect();
        Ok(SnapshotInfo::new(dir.clone(), names))
    }

    /// Delete the one snapshot starting with `prefix`, or every snapshot for `all`
    pub fn delete_snapshot(&self, prefix: &str) -> Result<(), PersistenceError> {
        let dir = &self.layout.snapshots_dir;
        let names = entry_names(dir)?;

        if prefix == ALL_SNAPSHOTS {
            for name in &names {
                file_ops::delete_file(&dir.join(name), &self.deferred)?;
            }
            tracing::info!(count = names.len(), "deleted all snapshots");
            return Ok(());
        }

        let mut matches: Vec<String> = names
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect();
        match matches.pop() {
            None => Err(PersistenceError::SnapshotNotFound {
                prefix: prefix.to_string(),
                dir: dir.clone(),
            }),
            Some(name) if matches.is_empty() => {
                let path = dir.join(&name);
                file_ops::delete_file(&path, &self.deferred)?;
                tracing::info!(snapshot = %path.display(), "deleted snapshot");
                Ok(())
            }
            Some(name) => {
                matches.push(name);
                Err(PersistenceError::AmbiguousName {
                    name: prefix.to_string(),
                    dir: dir.clone(),
                    candidates: matches,
                })
            }
        }
    }
}
