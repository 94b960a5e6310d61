//! Form definitions and their persistence.
//!
//! This crate provides the [`FormDefinition`] model and a [`FormStore`] trait
//! for abstracting where forms are kept:
//!
//! - [`FsFormStore`] keeps one JSON document per form in a directory
//! - [`MockFormStore`] keeps forms in memory (behind the `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wpcf_storage::{FormDefinition, FormStore, FsFormStore};
//!
//! let store = FsFormStore::new(PathBuf::from("forms"));
//! store.create(&FormDefinition::starter(FormDefinition::new_id(), chrono::Utc::now()))?;
//! ```

mod form;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use form::{
    ConditionalSettings, DEFAULT_NEXT_LABEL, DEFAULT_PREV_LABEL, FormDate, FormDefinition,
    MESSAGE_KEYS, MailSettings, MessageCatalog, MultiStepSettings, STARTER_CONTENT, Step,
};
pub use fs::FsFormStore;
#[cfg(feature = "mock")]
pub use mock::MockFormStore;
pub use storage::{ErrorStatus, FormStore, StorageError, StorageErrorKind, validate_form};
