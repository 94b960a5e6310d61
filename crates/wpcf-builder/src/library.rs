//! Form library: listing and lifecycle operations over a store.

use chrono::{DateTime, Utc};
use tracing::info;
use wpcf_storage::{FormDefinition, FormStore};

use crate::editor::EditorSession;
use crate::error::BuilderError;
use crate::identity::{Identity, require_editor};

/// Store-backed form collection for one caller.
///
/// Listing is open to everyone; every mutation requires an authorized editor.
pub struct FormLibrary<'a> {
    store: &'a dyn FormStore,
    identity: &'a dyn Identity,
}

impl<'a> FormLibrary<'a> {
    #[must_use]
    pub fn new(store: &'a dyn FormStore, identity: &'a dyn Identity) -> Self {
        Self { store, identity }
    }

    /// All stored forms.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Storage`] if the store cannot be listed.
    pub fn list(&self) -> Result<Vec<FormDefinition>, BuilderError> {
        Ok(self.store.list()?)
    }

    /// Create a form with one empty step. Without a title, it is named
    /// `New contact form N`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Unauthorized`] or [`BuilderError::Storage`].
    pub fn create_blank(
        &self,
        title: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<FormDefinition, BuilderError> {
        require_editor(self.identity, "create forms")?;
        let title = match title {
            Some(title) => title.to_owned(),
            None => format!("New contact form {}", self.store.list()?.len() + 1),
        };
        let form = FormDefinition::blank(FormDefinition::new_id(), title, now);
        self.store.create(&form)?;
        info!(id = %form.id, title = %form.title, "Created form");
        Ok(form)
    }

    /// Create the ready-made contact form.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Unauthorized`] or [`BuilderError::Storage`].
    pub fn create_starter(&self, now: DateTime<Utc>) -> Result<FormDefinition, BuilderError> {
        require_editor(self.identity, "create forms")?;
        let form = FormDefinition::starter(FormDefinition::new_id(), now);
        self.store.create(&form)?;
        info!(id = %form.id, "Created starter form");
        Ok(form)
    }

    /// Store a deep copy of form `id` under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Unauthorized`] or [`BuilderError::Storage`]
    /// (including not found).
    pub fn duplicate(&self, id: &str, now: DateTime<Utc>) -> Result<FormDefinition, BuilderError> {
        require_editor(self.identity, "duplicate forms")?;
        let copy = self.store.get(id)?.duplicate(FormDefinition::new_id(), now);
        self.store.create(&copy)?;
        info!(source = id, id = %copy.id, "Duplicated form");
        Ok(copy)
    }

    /// Delete form `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Unauthorized`] or [`BuilderError::Storage`].
    pub fn delete(&self, id: &str) -> Result<(), BuilderError> {
        require_editor(self.identity, "delete forms")?;
        self.store.delete(id)?;
        info!(id, "Deleted form");
        Ok(())
    }

    /// Open an editor on form `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Unauthorized`] or [`BuilderError::Storage`].
    pub fn edit(&self, id: &str) -> Result<EditorSession, BuilderError> {
        require_editor(self.identity, "edit forms")?;
        Ok(EditorSession::open(self.store.get(id)?))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wpcf_storage::{MockFormStore, StorageErrorKind};

    use super::*;
    use crate::identity::StaticIdentity;

    #[test]
    fn test_create_blank_default_title() {
        let store = MockFormStore::new().with_form(FormDefinition::starter("abc", Utc::now()));
        let identity = StaticIdentity::editor();
        let library = FormLibrary::new(&store, &identity);

        let form = library.create_blank(None, Utc::now()).unwrap();
        assert_eq!(form.title, "New contact form 2");
        assert_eq!(form.steps.len(), 1);
        assert!(form.steps[0].content.is_empty());
        assert_eq!(library.list().unwrap().len(), 2);
    }

    #[test]
    fn test_create_starter() {
        let store = MockFormStore::new();
        let identity = StaticIdentity::editor();
        let library = FormLibrary::new(&store, &identity);

        let form = library.create_starter(Utc::now()).unwrap();
        assert_eq!(store.get(&form.id).unwrap().title, "Contact form 1");
    }

    #[test]
    fn test_duplicate() {
        let store = MockFormStore::new().with_form(FormDefinition::starter("abc", Utc::now()));
        let identity = StaticIdentity::editor();
        let library = FormLibrary::new(&store, &identity);

        let copy = library.duplicate("abc", Utc::now()).unwrap();
        assert_ne!(copy.id, "abc");
        assert_eq!(copy.title, "Contact form 1 (copy)");
        assert_eq!(copy.steps, store.get("abc").unwrap().steps);
    }

    #[test]
    fn test_duplicate_missing() {
        let store = MockFormStore::new();
        let identity = StaticIdentity::editor();
        let library = FormLibrary::new(&store, &identity);

        let err = library.duplicate("nope", Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            BuilderError::Storage(ref e) if e.kind == StorageErrorKind::NotFound
        ));
    }

    #[test]
    fn test_viewer_cannot_mutate() {
        let store = MockFormStore::new().with_form(FormDefinition::starter("abc", Utc::now()));
        let identity = StaticIdentity::viewer();
        let library = FormLibrary::new(&store, &identity);

        assert!(library.list().is_ok());
        assert!(matches!(
            library.create_blank(Some("x"), Utc::now()),
            Err(BuilderError::Unauthorized(_))
        ));
        assert!(matches!(
            library.delete("abc"),
            Err(BuilderError::Unauthorized(_))
        ));
        assert!(matches!(
            library.edit("abc"),
            Err(BuilderError::Unauthorized(_))
        ));
        assert!(store.exists("abc"));
    }

    #[test]
    fn test_delete() {
        let store = MockFormStore::new().with_form(FormDefinition::starter("abc", Utc::now()));
        let identity = StaticIdentity::editor();
        let library = FormLibrary::new(&store, &identity);

        library.delete("abc").unwrap();
        assert!(library.list().unwrap().is_empty());
    }
}
