// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable identity of a configuration file and its history
//!
//! ```text
//! <configuration dir>/
//!   standalone.xml                    main file
//!   standalone_xml_history/
//!     standalone.initial.xml          first boot ever
//!     standalone.boot.xml             this boot
//!     standalone.last.xml             last persisted
//!     current/standalone.v1.xml       versions since this boot
//!     snapshot/20260314-150926026standalone.xml
//!     20260301-091500000/             versions from an earlier boot
//! ```
//!
//! Nothing under the history root is touched until [`ConfigurationFile::successful_boot`]
//! runs; before that backup and commit calls are no-ops.
//!
//! In persist-original mode the main file is the persisted state. Otherwise
//! the main file is left as booted and commits land on the `last` marker.

mod history;
mod resolve;
mod snapshot;

#[cfg(test)]
mod fixture;





pub use history::VersionEntry;
pub use snapshot::SnapshotInfo;

use crate::clock::{Clock, SystemClock};
use crate::config::HistoryConfig;
use crate::error::PersistenceError;
use crate::file_ops::{self, DeferredDeletes};
use crate::naming::{self, Marker};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Name of the directory holding versions written since the last boot
pub const CURRENT_DIR: &str = "current";
/// Name of the directory holding snapshots
pub const SNAPSHOT_DIR: &str = "snapshot";

/// How to locate a configuration file
#[derive(Debug, Clone)]
pub struct ConfigurationFileOptions {
    /// Directory holding the main file and its history
    pub configuration_dir: PathBuf,
    /// Configured file name, e.g. `standalone.xml`
    pub raw_name: String,
    /// Name to boot from: `last`, `initial`, `boot`, `vN`, a snapshot
    /// prefix, a file under the configuration directory or an absolute path
    pub boot_name: Option<String>,
    /// Whether commits rewrite the main file
    pub persist_original: bool,
    pub history: HistoryConfig,
}

impl ConfigurationFileOptions {
    pub fn new(configuration_dir: impl Into<PathBuf>, raw_name: impl Into<String>) -> Self {
        Self {
            configuration_dir: configuration_dir.into(),
            raw_name: raw_name.into(),
            boot_name: None,
            persist_original: true,
            history: HistoryConfig::default(),
        }
    }

    pub fn boot_name(mut self, name: impl Into<String>) -> Self {
        self.boot_name = Some(name.into());
        self
    }

    pub fn persist_original(mut self, persist_original: bool) -> Self {
        self.persist_original = persist_original;
        self
    }

    pub fn history(mut self, history: HistoryConfig) -> Self {
        self.history = history;
        self
    }
}

/// Directories derived from the configuration directory and raw name
#[derive(Debug, Clone)]
struct Layout {
    configuration_dir: PathBuf,
    history_root: PathBuf,
    current_history: PathBuf,
    snapshots_dir: PathBuf,
}

impl Layout {
    fn new(configuration_dir: PathBuf, raw_name: &str) -> Self {
        let history_root = configuration_dir.join(format!("{}_history", raw_name.replace('.', "_")));
        Self {
            current_history: history_root.join(CURRENT_DIR),
            snapshots_dir: history_root.join(SNAPSHOT_DIR),
            history_root,
            configuration_dir,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    boot_file: Option<PathBuf>,
    reload_using_last: bool,
    booted: bool,
    sequence: u64,
}

/// A configuration file with versioned history and snapshots
///
/// All mutating operations serialize on one internal lock.
#[derive(Debug)]
pub struct ConfigurationFile<C: Clock = SystemClock> {
    layout: Layout,
    raw_name: String,
    boot_file_name: String,
    main_file: PathBuf,
    main_file_name: String,
    persist_original: bool,
    history: HistoryConfig,
    clock: C,
    deferred: DeferredDeletes,
    state: Mutex<State>,
}

impl ConfigurationFile<SystemClock> {
    /// Resolve the main file described by `options`
    pub fn open(options: ConfigurationFileOptions) -> Result<Self, PersistenceError> {
        Self::open_with_clock(options, SystemClock)
    }
}

impl<C: Clock> ConfigurationFile<C> {
    /// Resolve the main file described by `options`, timestamping with `clock`
    pub fn open_with_clock(
        options: ConfigurationFileOptions,
        clock: C,
    ) -> Result<Self, PersistenceError> {
        let ConfigurationFileOptions {
            configuration_dir,
            raw_name,
            boot_name,
            persist_original,
            history,
        } = options;

        if !configuration_dir.is_dir() {
            return Err(PersistenceError::DirectoryNotFound(configuration_dir));
        }
        let layout = Layout::new(resolve::canonical(&configuration_dir)?, &raw_name);
        let main_file = layout.main_file(&raw_name, boot_name.as_deref(), persist_original)?;
        let main_file_name = main_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| raw_name.clone());

        tracing::debug!(
            main_file = %main_file.display(),
            boot_name = ?boot_name,
            persist_original,
            "resolved configuration file"
        );

        Ok(Self {
            layout,
            boot_file_name: boot_name.unwrap_or_else(|| raw_name.clone()),
            raw_name,
            main_file,
            main_file_name,
            persist_original,
            history,
            clock,
            deferred: DeferredDeletes::new(),
            state: Mutex::new(State::default()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn configuration_dir(&self) -> &Path {
        &self.layout.configuration_dir
    }

    pub fn history_root(&self) -> &Path {
        &self.layout.history_root
    }

    pub fn current_history_dir(&self) -> &Path {
        &self.layout.current_history
    }

    pub fn snapshots_dir(&self) -> &Path {
        &self.layout.snapshots_dir
    }

    /// The configured name, before symbolic resolution
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// The name the boot file is resolved from
    pub fn boot_file_name(&self) -> &str {
        &self.boot_file_name
    }

    /// Canonical path of the authoritative configuration file
    pub fn main_file(&self) -> &Path {
        &self.main_file
    }

    pub fn main_file_name(&self) -> &str {
        &self.main_file_name
    }

    pub fn persist_original(&self) -> bool {
        self.persist_original
    }

    pub fn history_config(&self) -> HistoryConfig {
        self.history
    }

    /// Deletions that failed and are waiting to be retried
    pub fn deferred_deletes(&self) -> &DeferredDeletes {
        &self.deferred
    }

    /// Path of a marker file under the history root
    pub fn marker_file(&self, marker: Marker) -> PathBuf {
        self.layout
            .history_root
            .join(naming::add_suffix(&self.main_file_name, marker.as_str()))
    }

    /// Path of version `n` under `current/`
    pub fn versioned_file(&self, n: u64) -> PathBuf {
        self.layout
            .current_history
            .join(naming::add_suffix(&self.main_file_name, &naming::version_tag(n)))
    }

    /// The file commits land on: the main file, or the `last` marker
    pub fn persisted_file(&self) -> PathBuf {
        if self.persist_original {
            self.main_file.clone()
        } else {
            self.marker_file(Marker::Last)
        }
    }

    pub fn is_booted(&self) -> bool {
        self.lock().booted
    }

    /// Number of versions backed up since this instance booted
    pub fn sequence(&self) -> u64 {
        self.lock().sequence
    }

    /// The file the configuration is read from at boot
    ///
    /// Resolved on first use and memoized until [`reset_boot_file`](Self::reset_boot_file).
    pub fn boot_file(&self) -> Result<PathBuf, PersistenceError> {
        let mut state = self.lock();
        self.boot_file_locked(&mut state)
    }

    fn boot_file_locked(&self, state: &mut State) -> Result<PathBuf, PersistenceError> {
        if let Some(path) = &state.boot_file {
            return Ok(path.clone());
        }
        let name = if !self.persist_original && state.reload_using_last {
            Marker::Last.as_str()
        } else {
            self.boot_file_name.as_str()
        };
        let path = if name == self.raw_name {
            self.main_file.clone()
        } else {
            self.layout
                .boot_file(name, &self.main_file_name, self.persist_original)?
        };
        tracing::debug!(name, boot_file = %path.display(), "resolved boot file");
        state.boot_file = Some(path.clone());
        Ok(path)
    }

    /// Forget the memoized boot file ahead of a reload
    ///
    /// With `reload_using_last` set, a non-persist-original file boots from
    /// its `last` marker next time. Does not re-arm [`successful_boot`](Self::successful_boot).
    pub fn reset_boot_file(&self, reload_using_last: bool) {
        let mut state = self.lock();
        state.boot_file = None;
        state.reload_using_last = reload_using_last;
    }

    /// Record that the configuration booted, seeding the history markers
    ///
    /// The boot file is first copied to the main file (or a scratch copy
    /// beside it), then `current/` is rotated, `initial` is written if it
    /// never was, and `last` and `boot` are rewritten. Only the first call
    /// has any effect.
    pub fn successful_boot(&self) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        if state.booted {
            return Ok(());
        }
        let boot_file = self.boot_file_locked(&mut state)?;

        let copy_source = if self.persist_original {
            self.main_file.clone()
        } else {
            let mut name = self.main_file.as_os_str().to_os_string();
            name.push(".boot");
            let scratch = PathBuf::from(name);
            file_ops::delete_file(&scratch, &self.deferred)?;
            scratch
        };

        let result = self.back_up_boot(&boot_file, &copy_source);
        if !self.persist_original {
            if let Err(e) = file_ops::delete_file(&copy_source, &self.deferred) {
                tracing::warn!(error = %e, "boot scratch copy left behind");
            }
        }
        result?;

        state.booted = true;
        tracing::info!(
            main_file = %self.main_file.display(),
            boot_file = %boot_file.display(),
            "configuration booted"
        );
        Ok(())
    }

    fn back_up_boot(&self, boot_file: &Path, copy_source: &Path) -> Result<(), PersistenceError> {
        if boot_file != copy_source {
            file_ops::copy_file(boot_file, copy_source).map_err(|source| boot_backup(boot_file, source))?;
        }
        self.create_history_directory()?;

        let initial = self.marker_file(Marker::Initial);
        if !initial.exists() {
            file_ops::copy_file(copy_source, &initial).map_err(|source| boot_backup(&initial, source))?;
        }
        for marker in [Marker::Last, Marker::Boot] {
            let target = self.marker_file(marker);
            file_ops::copy_file(copy_source, &target).map_err(|source| boot_backup(&target, source))?;
        }
        Ok(())
    }

    /// Move the persisted file into `current/` as the next version
    ///
    /// No-op before boot. Versions older than the configured history length
    /// are pruned afterwards.
    pub fn backup(&self) -> Result<(), PersistenceError> {
        let mut state = self.lock();
        if !state.booted {
            return Ok(());
        }
        let source = self.persisted_file();
        state.sequence += 1;
        let sequence = state.sequence;
        let target = self.versioned_file(sequence);

        if source.exists() {
            file_ops::delete_file(&target, &self.deferred)?;
            file_ops::rename(&source, &target).map_err(|e| PersistenceError::Backup {
                path: source.clone(),
                source: e,
            })?;
            tracing::info!(version = sequence, path = %target.display(), "backed up configuration");
        } else {
            tracing::warn!(path = %source.display(), "nothing to back up");
        }

        self.prune_versions(sequence);
        Ok(())
    }

    /// Land a fully written temp file on the persisted file
    ///
    /// No-op before boot.
    pub fn commit_temp_file(&self, temp: &Path) -> Result<(), PersistenceError> {
        let state = self.lock();
        if !state.booted {
            return Ok(());
        }
        file_ops::move_temp_file_to_main(temp, &self.persisted_file(), &self.deferred)
    }

    /// Bring the `last` marker up to date after the main file was rewritten
    ///
    /// Only applies in persist-original mode; otherwise commits already
    /// land on `last`.
    pub fn file_written(&self) -> Result<(), PersistenceError> {
        let state = self.lock();
        if !state.booted || !self.persist_original {
            return Ok(());
        }
        let last = self.marker_file(Marker::Last);
        file_ops::copy_file(&self.main_file, &last).map_err(|source| PersistenceError::io(&last, source))
    }
}

fn boot_backup(path: &Path, source: io::Error) -> PersistenceError {
    PersistenceError::BootBackup {
        path: path.to_path_buf(),
        source,
    }
}

/// Sorted entry names of `dir`; a missing directory has none
fn entry_names(dir: &Path) -> Result<Vec<String>, PersistenceError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(PersistenceError::io(dir, e)),
    };
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PersistenceError::io(dir, e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
