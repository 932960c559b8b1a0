// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! History directory rotation and pruning

use super::{entry_names, ConfigurationFile};
use crate::clock::Clock;
use crate::error::PersistenceError;
use crate::file_ops;
use crate::naming;
use chrono::{DateTime, Duration, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Offset applied to the archive name when the first choice is taken
const ARCHIVE_RETRY_OFFSET_MS: i64 = 100;

/// A backed-up version in `current/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub version: u64,
    pub path: PathBuf,
}

impl<C: Clock> ConfigurationFile<C> {
    /// Prepare the history root for a new boot
    ///
    /// A non-empty `current/` from the previous boot is archived under a
    /// timestamped name, archives older than the retention window are
    /// removed, and an empty `current/` is created.
    pub(super) fn create_history_directory(&self) -> Result<(), PersistenceError> {
        file_ops::ensure_directory(&self.layout.history_root)?;
        file_ops::ensure_directory(&self.layout.snapshots_dir)?;

        let now = self.clock.now();
        let current = &self.layout.current_history;
        if current.exists() {
            if !current.is_dir() {
                return Err(PersistenceError::NotADirectory(current.clone()));
            }
            if !entry_names(current)?.is_empty() {
                self.archive_current(&now);
            }
        }
        self.prune_archives(&now);

        file_ops::ensure_directory(current)
    }

    fn archive_current(&self, now: &DateTime<Local>) {
        let current = &self.layout.current_history;
        let first = self.layout.history_root.join(naming::timestamp(now));
        if try_rename(current, &first) {
            tracing::info!(archive = %first.display(), "archived previous history");
            return;
        }

        let retry_time = *now + Duration::milliseconds(ARCHIVE_RETRY_OFFSET_MS);
        let retry = self.layout.history_root.join(naming::timestamp(&retry_time));
        if try_rename(current, &retry) {
            tracing::info!(archive = %retry.display(), "archived previous history");
        } else {
            tracing::warn!(
                current = %current.display(),
                archive = %retry.display(),
                "could not archive previous history"
            );
        }
    }

    /// Remove archived history directories older than `history_days`
    fn prune_archives(&self, now: &DateTime<Local>) {
        let cutoff = Duration::try_days(i64::from(self.history.history_days))
            .and_then(|days| now.checked_sub_signed(days));
        let Some(cutoff) = cutoff else {
            return;
        };
        let cutoff = naming::timestamp(&cutoff);

        let names = match entry_names(&self.layout.history_root) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "could not list history archives");
                return;
            }
        };
        for name in names {
            if name.len() != cutoff.len() || !naming::is_timestamp(&name) || name >= cutoff {
                continue;
            }
            let archive = self.layout.history_root.join(&name);
            match fs::remove_dir_all(&archive) {
                Ok(()) => tracing::info!(archive = %archive.display(), "removed expired history"),
                Err(e) => tracing::warn!(
                    archive = %archive.display(),
                    error = %e,
                    "could not remove expired history"
                ),
            }
        }
    }

    /// Delete versions that fell out of the retention window
    ///
    /// Walks down from `sequence - current_history_length` and stops at
    /// the first version that is already gone.
    pub(super) fn prune_versions(&self, sequence: u64) {
        let length = self.history.current_history_length;
        if sequence <= length {
            return;
        }
        for n in (1..=sequence - length).rev() {
            let path = self.versioned_file(n);
            if !path.exists() {
                break;
            }
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not prune version");
            }
        }
    }

    /// Versions currently in `current/`, oldest first
    pub fn versions(&self) -> Result<Vec<VersionEntry>, PersistenceError> {
        let mut versions: Vec<VersionEntry> = entry_names(&self.layout.current_history)?
            .into_iter()
            .filter_map(|name| {
                naming::version_of(&name, &self.main_file_name).map(|version| VersionEntry {
                    version,
                    path: self.layout.current_history.join(name),
                })
            })
            .collect();
        versions.sort_by_key(|v| v.version);
        Ok(versions)
    }

    /// Archived history directories, oldest first
    pub fn archives(&self) -> Result<Vec<PathBuf>, PersistenceError> {
        Ok(entry_names(&self.layout.history_root)?
            .into_iter()
            .filter(|name| naming::is_timestamp(name))
            .map(|name| self.layout.history_root.join(name))
            .collect())
    }
}

fn try_rename(from: &Path, to: &Path) -> bool {
    if to.exists() {
        return false;
    }
    match fs::rename(from, to) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(from = %from.display(), to = %to.display(), error = %e, "rename failed");
            false
        }
    }
}
