// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scratch configuration directories for tests

use super::{ConfigurationFile, ConfigurationFileOptions};
use crate::clock::FakeClock;
use crate::config::HistoryConfig;
use crate::file_ops::{self, DeferredDeletes};
use chrono::{Duration, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `standard/standard.xml` containing `std` and `external/standard.xml` containing `ext`
pub(super) struct Fixture {
    _root: TempDir,
    pub standard_dir: PathBuf,
    pub external_dir: PathBuf,
    pub standard_file: PathBuf,
    pub external_file: PathBuf,
    pub history_dir: PathBuf,
    pub current_dir: PathBuf,
    pub snapshot_dir: PathBuf,
    pub clock: FakeClock,
    pub history: HistoryConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let base = fs::canonicalize(root.path()).unwrap();
        let standard_dir = base.join("standard");
        let external_dir = base.join("external");
        fs::create_dir(&standard_dir).unwrap();
        fs::create_dir(&external_dir).unwrap();
        let history_dir = standard_dir.join("standard_xml_history");

        let fixture = Self {
            standard_file: standard_dir.join("standard.xml"),
            external_file: external_dir.join("standard.xml"),
            current_dir: history_dir.join("current"),
            snapshot_dir: history_dir.join("snapshot"),
            history_dir,
            standard_dir,
            external_dir,
            _root: root,
            clock: FakeClock::at(Local.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()),
            history: HistoryConfig::default(),
        };
        fixture.write(&fixture.standard_file, "std");
        fixture.write(&fixture.external_file, "ext");
        fixture
    }

    pub fn write(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn options(&self, boot_name: Option<&str>, persist_original: bool) -> ConfigurationFileOptions {
        let options = ConfigurationFileOptions::new(&self.standard_dir, "standard.xml")
            .persist_original(persist_original)
            .history(self.history);
        match boot_name {
            Some(name) => options.boot_name(name),
            None => options,
        }
    }

    /// Open a configuration file one second after the previous open
    pub fn open(&self, boot_name: Option<&str>, persist_original: bool) -> ConfigurationFile<FakeClock> {
        self.clock.advance(Duration::seconds(1));
        ConfigurationFile::open_with_clock(self.options(boot_name, persist_original), self.clock.clone())
            .unwrap()
    }

    /// Run the write-backup-commit sequence a persistence resource performs
    pub fn store(&self, file: &ConfigurationFile<FakeClock>, content: &str) {
        let temp = file_ops::temp_file_for(file.main_file());
        let deferred = DeferredDeletes::new();
        file_ops::write_to_temp_file(content.as_bytes(), &temp, &deferred).unwrap();
        file.backup().unwrap();
        file.commit_temp_file(&temp).unwrap();
        file.file_written().unwrap();
        file_ops::delete_file(&temp, &deferred).unwrap();
    }

    pub fn history_file(&self, main_stem: &str, suffix: &str) -> PathBuf {
        self.history_dir.join(format!("{}.{}.xml", main_stem, suffix))
    }

    pub fn version_file(&self, main_stem: &str, n: u64) -> PathBuf {
        self.current_dir.join(format!("{}.v{}.xml", main_stem, n))
    }

    /// Assert main, marker and version contents; the version after the
    /// last expected one must not exist
    pub fn check_files(
        &self,
        main_stem: Option<&str>,
        main: &str,
        initial: &str,
        boot: &str,
        last: &str,
        versions: &[&str],
    ) {
        let stem = main_stem.unwrap_or("standard");
        assert_eq!(read(&self.standard_dir.join(format!("{}.xml", stem))), main, "main file");
        assert_eq!(read(&self.history_file(stem, "initial")), initial, "initial marker");
        assert_eq!(read(&self.history_file(stem, "boot")), boot, "boot marker");
        assert_eq!(read(&self.history_file(stem, "last")), last, "last marker");
        for (i, expected) in versions.iter().enumerate() {
            let n = i as u64 + 1;
            assert_eq!(read(&self.version_file(stem, n)), *expected, "version {}", n);
        }
        let next = self.version_file(stem, versions.len() as u64 + 1);
        assert!(!next.exists(), "{} should not exist", next.display());
    }
}

pub(super) fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}
