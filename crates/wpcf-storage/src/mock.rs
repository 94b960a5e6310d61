//! Mock form store for testing.
//!
//! Provides [`MockFormStore`] for unit testing without filesystem access.

use std::sync::RwLock;

use crate::form::FormDefinition;
use crate::storage::{FormStore, StorageError, StorageErrorKind, validate_form};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory form store for testing.
///
/// Keeps forms in insertion order. Writes can be made to fail on demand to
/// exercise error paths in callers.
///
/// # Example
///
/// ```ignore
/// use wpcf_storage::{FormDefinition, FormStore, MockFormStore, StorageErrorKind};
///
/// let store = MockFormStore::new()
///     .with_form(FormDefinition::starter("abc", chrono::Utc::now()))
///     .failing_writes(StorageErrorKind::Unavailable);
///
/// assert!(store.get("abc").is_ok());
/// assert!(store.delete("abc").is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockFormStore {
    forms: RwLock<Vec<FormDefinition>>,
    write_failure: RwLock<Option<StorageErrorKind>>,
}

impl MockFormStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a form.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_form(self, form: FormDefinition) -> Self {
        self.forms.write().unwrap().push(form);
        self
    }

    /// Make every subsequent write fail with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing_writes(self, kind: StorageErrorKind) -> Self {
        self.set_write_failure(Some(kind));
        self
    }

    /// Set or clear the injected write failure.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_write_failure(&self, kind: Option<StorageErrorKind>) {
        *self.write_failure.write().unwrap() = kind;
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        match *self.write_failure.read().unwrap() {
            Some(kind) => Err(StorageError::new(kind).with_backend(BACKEND)),
            None => Ok(()),
        }
    }
}

impl FormStore for MockFormStore {
    fn list(&self) -> Result<Vec<FormDefinition>, StorageError> {
        Ok(self.forms.read().unwrap().clone())
    }

    fn create(&self, form: &FormDefinition) -> Result<(), StorageError> {
        self.check_writable()?;
        validate_form(form).map_err(|e| e.with_backend(BACKEND))?;
        let mut forms = self.forms.write().unwrap();
        if forms.iter().any(|f| f.id == form.id) {
            return Err(StorageError::already_exists(&form.id).with_backend(BACKEND));
        }
        forms.push(form.clone());
        Ok(())
    }

    fn update(&self, form: &FormDefinition) -> Result<(), StorageError> {
        self.check_writable()?;
        validate_form(form).map_err(|e| e.with_backend(BACKEND))?;
        let mut forms = self.forms.write().unwrap();
        let slot = forms
            .iter_mut()
            .find(|f| f.id == form.id)
            .ok_or_else(|| StorageError::not_found(&form.id).with_backend(BACKEND))?;
        *slot = form.clone();
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut forms = self.forms.write().unwrap();
        let before = forms.len();
        forms.retain(|f| f.id != id);
        if forms.len() == before {
            return Err(StorageError::not_found(id).with_backend(BACKEND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn form(id: &str) -> FormDefinition {
        FormDefinition::blank(id, id.to_uppercase(), Utc::now())
    }

    #[test]
    fn test_insertion_order() {
        let store = MockFormStore::new().with_form(form("b")).with_form(form("a"));
        store.create(&form("c")).unwrap();

        let ids: Vec<_> = store.list().unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_get_uses_default_lookup() {
        let store = MockFormStore::new().with_form(form("a"));
        assert_eq!(store.get("a").unwrap().title, "A");
        assert_eq!(store.get("x").unwrap_err().kind, StorageErrorKind::NotFound);
        assert!(store.exists("a"));
    }

    #[test]
    fn test_update_and_delete() {
        let store = MockFormStore::new().with_form(form("a"));
        let mut changed = form("a");
        changed.title = "Changed".to_owned();

        store.update(&changed).unwrap();
        assert_eq!(store.get("a").unwrap().title, "Changed");

        store.delete("a").unwrap();
        assert_eq!(store.delete("a").unwrap_err().kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_injected_write_failure() {
        let store = MockFormStore::new()
            .with_form(form("a"))
            .failing_writes(StorageErrorKind::Unavailable);

        let err = store.update(&form("a")).unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::Unavailable);
        assert_eq!(err.backend, Some("Mock"));
        assert!(store.list().is_ok());

        store.set_write_failure(None);
        assert!(store.update(&form("a")).is_ok());
    }
}
