// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of symbolic names to main and boot files
//!
//! Names are tried in order: a marker (`last`, `initial`, `boot`), a
//! version tag (`v12`), a snapshot prefix, a file relative to the
//! configuration directory, then (unless persisting the original) an
//! absolute path.

use super::{entry_names, Layout};
use crate::error::PersistenceError;
use crate::naming::{self, Marker, TIMESTAMP_LEN};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

impl Layout {
    /// Canonical path of the main file for `name`
    pub(super) fn main_file(
        &self,
        raw_name: &str,
        name: Option<&str>,
        persist_original: bool,
    ) -> Result<PathBuf, PersistenceError> {
        let Some(name) = name else {
            return canonical(&self.configuration_dir.join(raw_name));
        };

        let main_name = if let Some(marker) = Marker::parse(name) {
            find_main_name_from_suffix(&self.history_root, marker.as_str(), raw_name)?
        } else if naming::is_version_tag(name) {
            find_main_name_from_suffix(&self.current_history, name, raw_name)?
        } else if let Some(snapshot) = self.find_snapshot_with_prefix(name)? {
            snapshot[TIMESTAMP_LEN..].to_string()
        } else {
            let path = Path::new(name);
            if path.is_relative() && self.configuration_dir.join(path).is_file() {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                naming::strip_prefix_suffix(&file_name)
            } else if !persist_original && path.is_absolute() && path.is_file() {
                return canonical(path);
            } else {
                return Err(PersistenceError::MainFileNotFound {
                    name: name.to_string(),
                    dir: self.configuration_dir.clone(),
                });
            }
        };

        canonical(&self.configuration_dir.join(main_name))
    }

    /// Path of the file to boot from for `name`
    ///
    /// Markers and version tags map to their slot for `main_name` whether
    /// or not the file exists yet.
    pub(super) fn boot_file(
        &self,
        name: &str,
        main_name: &str,
        persist_original: bool,
    ) -> Result<PathBuf, PersistenceError> {
        if Marker::parse(name).is_some() {
            return Ok(self.history_root.join(naming::add_suffix(main_name, name)));
        }
        if naming::is_version_tag(name) {
            return Ok(self.current_history.join(naming::add_suffix(main_name, name)));
        }
        if let Some(snapshot) = self.find_snapshot_with_prefix(name)? {
            return Ok(self.snapshots_dir.join(snapshot));
        }

        let path = Path::new(name);
        if path.is_relative() {
            let candidate = self.configuration_dir.join(path);
            if candidate.is_file() {
                return canonical(&candidate);
            }
        } else if !persist_original && path.is_file() {
            return canonical(path);
        }
        Err(PersistenceError::BootFileNotFound {
            name: name.to_string(),
            dir: self.configuration_dir.clone(),
        })
    }

    /// The single snapshot whose name starts with `prefix`, if any
    fn find_snapshot_with_prefix(&self, prefix: &str) -> Result<Option<String>, PersistenceError> {
        let mut matches: Vec<String> = entry_names(&self.snapshots_dir)?
            .into_iter()
            .filter(|n| n.starts_with(prefix) && naming::is_snapshot_name(n))
            .collect();
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(PersistenceError::AmbiguousName {
                name: prefix.to_string(),
                dir: self.snapshots_dir.clone(),
                candidates: matches,
            }),
        }
    }
}

/// Find the one file in `dir` ending in `.<tag><ext>` and recover its main name
fn find_main_name_from_suffix(
    dir: &Path,
    tag: &str,
    raw_name: &str,
) -> Result<String, PersistenceError> {
    let (_, ext) = naming::split_extension(raw_name);
    let suffix = format!(".{}{}", tag, ext);
    let mut matches: Vec<String> = entry_names(dir)?
        .into_iter()
        .filter(|n| n.ends_with(&suffix))
        .collect();

    let found = match matches.len() {
        0 => {
            return Err(PersistenceError::MarkerFileNotFound {
                suffix,
                dir: dir.to_path_buf(),
            })
        }
        1 => matches.pop().unwrap_or_default(),
        _ => {
            return Err(PersistenceError::AmbiguousName {
                name: tag.to_string(),
                dir: dir.to_path_buf(),
                candidates: matches,
            })
        }
    };
    if found == suffix {
        return Err(PersistenceError::NameNotAllowed(found));
    }
    let prefix = &found[..found.len() - suffix.len()];
    Ok(format!("{}{}", prefix, ext))
}

/// Canonicalize `path`, tolerating a missing final component chain
///
/// The deepest existing ancestor is canonicalized and the rest re-joined.
pub(super) fn canonical(path: &Path) -> Result<PathBuf, PersistenceError> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            match (path.parent(), path.file_name()) {
                (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
                    Ok(canonical(parent)?.join(name))
                }
                _ => Err(PersistenceError::Canonicalize {
                    path: path.to_path_buf(),
                    source: e,
                }),
            }
        }
        Err(source) => Err(PersistenceError::Canonicalize {
            path: path.to_path_buf(),
            source,
        }),
    }
}
