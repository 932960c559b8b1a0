// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by configuration persistence

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Opaque error produced by the marshalling collaborator
pub type MarshalError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while resolving, backing up or persisting a configuration
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("configuration directory {0} does not exist")]
    DirectoryNotFound(PathBuf),

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("could not create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("main configuration file {name} not found in {dir}")]
    MainFileNotFound { name: String, dir: PathBuf },

    #[error("boot configuration file {name} not found in {dir}")]
    BootFileNotFound { name: String, dir: PathBuf },

    #[error("no configuration file ending in {suffix} found in {dir}")]
    MarkerFileNotFound { suffix: String, dir: PathBuf },

    #[error("ambiguous name {name} in {dir}: {candidates:?}")]
    AmbiguousName {
        name: String,
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("configuration file may not be named {0}")]
    NameNotAllowed(String),

    #[error("could not canonicalize {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to back up boot configuration {path}: {source}")]
    BootBackup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to back up {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rename temp file {temp} to {target}: {source}")]
    RenameTemp {
        temp: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write configuration to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not delete {0}; deletion deferred")]
    DeleteDeferred(PathBuf),

    #[error("failed to take snapshot of {main} to {snapshot}: {source}")]
    Snapshot {
        main: PathBuf,
        snapshot: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no snapshot with prefix {prefix} found in {dir}")]
    SnapshotNotFound { prefix: String, dir: PathBuf },

    #[error("this persister does not support snapshots")]
    SnapshotsUnsupported,

    #[error("failed to marshal configuration: {0}")]
    Marshal(#[source] MarshalError),

    #[error("failed to load configuration from {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: MarshalError,
    },

    #[error("rollback already invoked")]
    RollbackAlreadyInvoked,

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.into(),
            source,
        }
    }
}
