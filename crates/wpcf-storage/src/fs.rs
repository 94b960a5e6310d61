//! Filesystem form store.
//!
//! Provides [`FsFormStore`], which keeps one pretty-printed JSON document per
//! form under a directory (`<dir>/<id>.json`).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::form::FormDefinition;
use crate::storage::{FormStore, StorageError, StorageErrorKind, validate_form};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension of stored records.
const EXTENSION: &str = "json";

/// Filesystem form store.
///
/// The directory is created on first write. A missing directory lists as
/// empty. Records that fail to decode are skipped by [`FormStore::list`] with
/// a warning, but reported as errors by [`FormStore::get`].
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use wpcf_storage::{FormStore, FsFormStore};
///
/// let store = FsFormStore::new(PathBuf::from("forms"));
/// for form in store.list()? {
///     println!("{}: {}", form.id, form.title);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FsFormStore {
    dir: PathBuf,
}

impl FsFormStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reject ids that would escape the store directory.
    ///
    /// Ids are limited to ASCII letters, digits, `-` and `_`.
    fn validate_id(id: &str) -> Result<(), StorageError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(())
        } else {
            Err(StorageError::new(StorageErrorKind::InvalidId)
                .with_form_id(id)
                .with_backend(BACKEND))
        }
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.{EXTENSION}"))
    }

    fn read_record(path: &Path) -> Result<FormDefinition, StorageError> {
        let text = fs::read_to_string(path)
            .map_err(|e| StorageError::io(e, Some(path.to_path_buf())).with_backend(BACKEND))?;
        serde_json::from_str(&text).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidRecord)
                .with_source(e)
                .with_path(path)
                .with_backend(BACKEND)
        })
    }

    /// Write through a sibling temp file so readers never see partial JSON.
    fn write_record(&self, form: &FormDefinition) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::io(e, Some(self.dir.clone())).with_backend(BACKEND))?;

        let mut json = serde_json::to_string_pretty(form).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidRecord)
                .with_source(e)
                .with_form_id(&form.id)
                .with_backend(BACKEND)
        })?;
        json.push('\n');

        let path = self.record_path(&form.id);
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&tmp, json)
            .map_err(|e| StorageError::io(e, Some(tmp.clone())).with_backend(BACKEND))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;

        info!(id = %form.id, path = %path.display(), "Saved form");
        Ok(())
    }
}

impl FormStore for FsFormStore {
    /// Forms are ordered by last-modified time, then id. Records whose date
    /// is a display string sort first.
    fn list(&self) -> Result<Vec<FormDefinition>, StorageError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| StorageError::io(e, Some(self.dir.clone())).with_backend(BACKEND))?;

        let mut forms = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_record(&path) {
                Ok(form) => forms.push(form),
                Err(e) => warn!(error = %e, "Skipping unreadable form record"),
            }
        }

        forms.sort_by(|a, b| {
            (a.modified.timestamp(), &a.id).cmp(&(b.modified.timestamp(), &b.id))
        });
        debug!(count = forms.len(), dir = %self.dir.display(), "Listed forms");
        Ok(forms)
    }

    fn get(&self, id: &str) -> Result<FormDefinition, StorageError> {
        Self::validate_id(id)?;
        Self::read_record(&self.record_path(id)).map_err(|e| e.with_form_id(id))
    }

    fn create(&self, form: &FormDefinition) -> Result<(), StorageError> {
        Self::validate_id(&form.id)?;
        validate_form(form).map_err(|e| e.with_backend(BACKEND))?;
        if self.record_path(&form.id).exists() {
            return Err(StorageError::already_exists(&form.id).with_backend(BACKEND));
        }
        self.write_record(form)
    }

    fn update(&self, form: &FormDefinition) -> Result<(), StorageError> {
        Self::validate_id(&form.id)?;
        validate_form(form).map_err(|e| e.with_backend(BACKEND))?;
        if !self.record_path(&form.id).exists() {
            return Err(StorageError::not_found(&form.id).with_backend(BACKEND));
        }
        self.write_record(form)
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        Self::validate_id(id)?;
        let path = self.record_path(id);
        fs::remove_file(&path).map_err(|e| {
            StorageError::io(e, Some(path.clone()))
                .with_form_id(id)
                .with_backend(BACKEND)
        })?;
        info!(id, "Deleted form");
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        Self::validate_id(id).is_ok() && self.record_path(id).exists()
    }
}
