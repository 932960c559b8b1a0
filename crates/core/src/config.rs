// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! History retention settings
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then environment overrides. The resolved value is handed to each
//! `ConfigurationFile` explicitly.
//!
//! ```toml
//! [history]
//! current_length = 100
//! days = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides the number of versioned backups kept in `current/`
pub const CURRENT_HISTORY_LENGTH_ENV: &str = "CK_CURRENT_HISTORY_LENGTH";
/// Overrides the retention window (in days) of archived history directories
pub const HISTORY_DAYS_ENV: &str = "CK_HISTORY_DAYS";

/// Errors loading a settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Retention settings for configuration history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of `vN` backups retained in `current/`
    pub current_history_length: u64,
    /// Archived history directories older than this many days are deleted
    pub history_days: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            current_history_length: 100,
            history_days: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(default)]
    history: HistorySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HistorySection {
    current_length: Option<u64>,
    days: Option<u32>,
}

impl HistoryConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load from an optional settings file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Read settings from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: SettingsFile = toml::from_str(content)?;
        let defaults = Self::default();
        Ok(Self {
            current_history_length: file
                .history
                .current_length
                .unwrap_or(defaults.current_history_length),
            history_days: file.history.days.unwrap_or(defaults.history_days),
        })
    }

    /// Apply overrides looked up by variable name
    ///
    /// Values that do not parse as non-negative integers are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(length) = parse_override(&lookup, CURRENT_HISTORY_LENGTH_ENV) {
            self.current_history_length = length;
        }
        if let Some(days) = parse_override(&lookup, HISTORY_DAYS_ENV) {
            self.history_days = days;
        }
        self
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid history setting");
            None
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
