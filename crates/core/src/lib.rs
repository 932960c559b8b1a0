// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck-core: versioned configuration files
//!
//! This crate provides:
//! - Resolution of symbolic boot names (`last`, `initial`, `boot`, `vN`, snapshots)
//! - The boot, backup and commit protocol over a history directory
//! - Snapshots and history retention
//! - Durable file primitives

pub mod clock;
pub mod config;
pub mod configuration_file;
pub mod error;
pub mod file_ops;
pub mod naming;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, HistoryConfig};
pub use configuration_file::{
    ConfigurationFile, ConfigurationFileOptions, SnapshotInfo, VersionEntry,
};
pub use error::{MarshalError, PersistenceError};
pub use file_ops::DeferredDeletes;
pub use naming::Marker;
