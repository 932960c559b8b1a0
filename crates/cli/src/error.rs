// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error reports for the terminal
//!
//! A report is the failure itself, then `->` notes on what `ck` was looking
//! at, then numbered suggestions.

use ck_core::{ConfigError, PersistenceError};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub struct CkError {
    message: String,
    notes: Vec<String>,
    suggestions: Vec<String>,
    cause: Option<Box<dyn Error + Send + Sync>>,
}

impl CkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            notes: Vec::new(),
            suggestions: Vec::new(),
            cause: None,
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn caused_by(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }
}

impl fmt::Display for CkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;
        if !self.notes.is_empty() {
            writeln!(f)?;
        }
        for note in &self.notes {
            writeln!(f, "  -> {}", note)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nsuggestions:\n")?;
        }
        for (n, suggestion) in (1..).zip(&self.suggestions) {
            writeln!(f, "  {}. {}", n, suggestion)?;
        }
        Ok(())
    }
}

impl Error for CkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

impl From<PersistenceError> for CkError {
    fn from(err: PersistenceError) -> Self {
        let report = CkError::new(err.to_string());
        let report = match &err {
            PersistenceError::DirectoryNotFound(_) => {
                report.suggest("Pass an existing configuration directory with --dir")
            }
            PersistenceError::MainFileNotFound { .. } => report
                .note("Names are resolved inside the configuration directory")
                .note("Absolute paths are only accepted with --read-only")
                .suggest("Check the name passed to --file or --boot"),
            PersistenceError::BootFileNotFound { .. } => report
                .suggest("Boot from a marker: initial, boot or last")
                .suggest("Boot from a version: v1, v2, ...")
                .suggest("Boot from a snapshot prefix: ck snapshot list"),
            PersistenceError::MarkerFileNotFound { .. } => report
                .note("History markers are written the first time the file boots")
                .suggest("Boot once to seed the history: ck boot"),
            PersistenceError::AmbiguousName { candidates, .. } => candidates
                .iter()
                .fold(report, |r, c| r.note(format!("matches {}", c)))
                .suggest("Use a longer prefix"),
            PersistenceError::SnapshotNotFound { .. } => {
                report.suggest("List snapshots: ck snapshot list")
            }
            PersistenceError::DeleteDeferred(_) => report
                .note("The file may be open in another process")
                .suggest("Close other users of the file and retry"),
            _ => report,
        };
        report.caused_by(err)
    }
}

impl From<ConfigError> for CkError {
    fn from(err: ConfigError) -> Self {
        let report = CkError::new(err.to_string());
        let report = match &err {
            ConfigError::Io { .. } => report.suggest("Check the path passed to --config"),
            ConfigError::Toml { .. } => report
                .note("Settings are read from a [history] table with current_length and days")
                .suggest("Fix the settings file or run without --config"),
        };
        report.caused_by(err)
    }
}

/// Render a command failure for stderr
pub fn render(err: anyhow::Error) -> String {
    let err = match err.downcast::<PersistenceError>() {
        Ok(err) => return CkError::from(err).to_string(),
        Err(err) => err,
    };
    match err.downcast::<CkError>() {
        Ok(report) => report.to_string(),
        Err(err) => format!("error: {:#}\n", err),
    }
}
