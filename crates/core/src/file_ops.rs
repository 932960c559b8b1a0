// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable file primitives
//!
//! Every write is synced to disk before the file is closed.

use crate::error::PersistenceError;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Paths whose deletion failed and should be retried later
///
/// Clones share one list. Whatever is still pending when the last clone
/// is dropped gets one more deletion attempt.
#[derive(Clone, Debug, Default)]
pub struct DeferredDeletes {
    pending: Arc<Pending>,
}

#[derive(Debug, Default)]
struct Pending {
    paths: Mutex<Vec<PathBuf>>,
}

impl Drop for Pending {
    fn drop(&mut self) {
        let paths = std::mem::take(self.paths.get_mut().unwrap_or_else(|e| e.into_inner()));
        for path in paths {
            if let Err(e) = remove_if_exists(&path) {
                tracing::warn!(path = %path.display(), error = %e, "deferred delete failed");
            }
        }
    }
}

impl DeferredDeletes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a path for a later deletion attempt
    pub fn defer(&self, path: &Path) {
        let mut paths = self.pending.paths.lock().unwrap_or_else(|e| e.into_inner());
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_path_buf());
        }
    }

    /// Paths still waiting to be deleted
    pub fn pending(&self) -> Vec<PathBuf> {
        self.pending
            .paths
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Try every pending deletion now; returns how many are still pending
    pub fn retry(&self) -> usize {
        let mut paths = self.pending.paths.lock().unwrap_or_else(|e| e.into_inner());
        paths.retain(|path| remove_if_exists(path).is_err());
        paths.len()
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Copy `src` over `dst` and sync the destination before closing it
pub fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let mut input = BufReader::new(File::open(src)?);
    let mut output = BufWriter::new(File::create(dst)?);
    io::copy(&mut input, &mut output)?;
    let file = output.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// Rename `from` to `to`, copying instead if the rename fails and the source survived
///
/// The copy fallback covers moves across filesystems; it is not atomic
/// and leaves the source in place.
pub fn rename(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if from.exists() => {
            tracing::debug!(
                from = %from.display(),
                to = %to.display(),
                error = %e,
                "rename failed, copying instead"
            );
            copy_file(from, to)
        }
        Err(e) => Err(e),
    }
}

/// Land a fully written temp file on its target
pub fn move_temp_file_to_main(
    temp: &Path,
    target: &Path,
    deferred: &DeferredDeletes,
) -> Result<(), PersistenceError> {
    rename(temp, target).map_err(|source| PersistenceError::RenameTemp {
        temp: temp.to_path_buf(),
        target: target.to_path_buf(),
        source,
    })?;
    // Only left behind when the rename fell back to a copy
    if let Err(e) = delete_file(temp, deferred) {
        tracing::warn!(error = %e, "temp file left behind after commit");
    }
    Ok(())
}

/// Delete a file if it exists
///
/// When the file survives a failed deletion it is queued on `deferred`
/// and `DeleteDeferred` is returned.
pub fn delete_file(path: &Path, deferred: &DeferredDeletes) -> Result<(), PersistenceError> {
    if fs::symlink_metadata(path).is_err() {
        return Ok(());
    }
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(_) if !path.exists() => Ok(()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not delete, deferring");
            deferred.defer(path);
            Err(PersistenceError::DeleteDeferred(path.to_path_buf()))
        }
    }
}

/// Replace `temp` with the contents of `buffer`, synced to disk
pub fn write_to_temp_file(
    buffer: &[u8],
    temp: &Path,
    deferred: &DeferredDeletes,
) -> Result<(), PersistenceError> {
    delete_file(temp, deferred)?;
    let write = || -> io::Result<()> {
        let mut output = BufWriter::new(File::create(temp)?);
        output.write_all(buffer)?;
        let file = output.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    };
    write().map_err(|source| PersistenceError::Write {
        path: temp.to_path_buf(),
        source,
    })
}

/// The temp file used when rewriting `path` (`<name>.tmp` beside it)
pub fn temp_file_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Create `dir` (and its parents) unless it already exists as a directory
pub fn ensure_directory(dir: &Path) -> Result<(), PersistenceError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| PersistenceError::CreateDirectory {
            path: dir.to_path_buf(),
            source,
        })
    } else if !dir.is_dir() {
        Err(PersistenceError::NotADirectory(dir.to_path_buf()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_ops_tests.rs"]
mod tests;
