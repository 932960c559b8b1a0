// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File naming rules for history markers, versions and snapshots
//!
//! ```text
//! standalone.xml                       main file
//! standalone.last.xml                  marker (last | boot | initial)
//! standalone.v12.xml                   version in current/
//! 20260314-150926026standalone.xml     snapshot
//! 20260314-150926026/                  archived current/
//! ```
//!
//! Suffixes are inserted before the final `.` of the file name.

use chrono::{DateTime, Local};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Deletes every snapshot when passed as a snapshot name
pub const ALL_SNAPSHOTS: &str = "all";

/// `chrono` format of timestamps used in snapshot and archive names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S%3f";

/// Width of a formatted timestamp (`yyyyMMdd-HHmmssSSS`)
pub const TIMESTAMP_LEN: usize = 18;

#[allow(clippy::expect_used)]
static VERSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}-\d{9}$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static SNAPSHOT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}-\d{9}(\S+)$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static VERSIONED_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\.v\d+(\.[^.]+)?$").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static MARKER_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\.(?:last|boot|initial)(\.[^.]+)?$").expect("constant regex pattern is valid")
});

/// Fixed-role history files kept beside `current/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// The most recently persisted configuration
    Last,
    /// The configuration seen on the very first boot
    Initial,
    /// The configuration the current process booted from
    Boot,
}

impl Marker {
    pub const ALL: [Marker; 3] = [Marker::Last, Marker::Initial, Marker::Boot];

    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Last => "last",
            Marker::Initial => "initial",
            Marker::Boot => "boot",
        }
    }

    /// Parse a symbolic boot name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a time as a fixed-width timestamp
pub fn timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Whether `name` is a symbolic version tag such as `v7`
pub fn is_version_tag(name: &str) -> bool {
    VERSION_TAG.is_match(name)
}

/// Whether `name` is a bare timestamp (an archived history directory)
pub fn is_timestamp(name: &str) -> bool {
    TIMESTAMP.is_match(name)
}

/// Whether `name` looks like `<timestamp><file name>`
pub fn is_snapshot_name(name: &str) -> bool {
    SNAPSHOT_NAME.is_match(name)
}

/// The version tag for sequence number `n`
pub fn version_tag(n: u64) -> String {
    format!("v{}", n)
}

/// Split a file name into stem and extension (the extension keeps its dot)
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(index) => file_name.split_at(index),
        None => (file_name, ""),
    }
}

/// Insert `.suffix` before the final `.` of `file_name`
pub fn add_suffix(file_name: &str, suffix: &str) -> String {
    let (stem, ext) = split_extension(file_name);
    format!("{}.{}{}", stem, suffix, ext)
}

/// Recover the main file name from a snapshot, version or marker file name
///
/// Names that match none of the patterns are returned unchanged.
pub fn strip_prefix_suffix(name: &str) -> String {
    if let Some(caps) = SNAPSHOT_NAME.captures(name) {
        return caps[1].to_string();
    }
    if let Some(caps) = VERSIONED_FILE.captures(name) {
        return join_captures(&caps);
    }
    if let Some(caps) = MARKER_FILE.captures(name) {
        return join_captures(&caps);
    }
    name.to_string()
}

fn join_captures(caps: &regex::Captures<'_>) -> String {
    let ext = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    format!("{}{}", &caps[1], ext)
}

/// Version number of `file_name` if it is a version of `main_name`
pub fn version_of(file_name: &str, main_name: &str) -> Option<u64> {
    let (stem, ext) = split_extension(main_name);
    file_name
        .strip_prefix(stem)?
        .strip_prefix(".v")?
        .strip_suffix(ext)
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))?
        .parse()
        .ok()
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
