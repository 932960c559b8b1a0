// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MAIN: &str = "standalone.xml";

/// A configuration directory holding `standalone.xml` with `content`
pub fn setup_config_dir(content: &str) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp.path().join(MAIN), content).expect("Failed to write main file");
    temp
}

/// `ck` pointed at `dir`
pub fn ck(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ck").expect("ck binary");
    cmd.arg("--dir").arg(dir).env_remove("RUST_LOG");
    cmd.env_remove("CK_CURRENT_HISTORY_LENGTH").env_remove("CK_HISTORY_DAYS");
    cmd
}

pub fn history_dir(dir: &Path) -> PathBuf {
    dir.join("standalone_xml_history")
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}
