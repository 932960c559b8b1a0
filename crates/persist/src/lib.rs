// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck-persist: storing configuration models with commit and rollback

mod marshal;
mod persister;
mod resource;


pub use marshal::{ConfigurationMarshaller, JsonMarshaller, TextMarshaller};
pub use persister::{
    BackupConfigurationPersister, ConfigurationPersister, FileConfigurationPersister,
    NullConfigurationPersister, TransientConfigurationPersister,
};
pub use resource::{
    ConfigurationFilePersistenceResource, FilePersistenceResource, NullPersistenceResource,
    PersistenceResource,
};
