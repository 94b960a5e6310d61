//! Editor authorization.

use crate::error::BuilderError;

/// Source of the "is this caller an authorized editor" signal.
pub trait Identity: Send + Sync {
    /// Whether the caller may create, edit and delete forms.
    fn is_authorized_editor(&self) -> bool;
}

/// Identity with a fixed answer, typically taken from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    editor: bool,
}

impl StaticIdentity {
    #[must_use]
    pub fn new(editor: bool) -> Self {
        Self { editor }
    }

    /// An authorized editor.
    #[must_use]
    pub fn editor() -> Self {
        Self::new(true)
    }

    /// A preview-only visitor.
    #[must_use]
    pub fn viewer() -> Self {
        Self::new(false)
    }
}

impl Identity for StaticIdentity {
    fn is_authorized_editor(&self) -> bool {
        self.editor
    }
}

/// Fail with [`BuilderError::Unauthorized`] unless `identity` may edit.
///
/// # Errors
///
/// Returns [`BuilderError::Unauthorized`] naming `action`.
pub fn require_editor(identity: &dyn Identity, action: &'static str) -> Result<(), BuilderError> {
    if identity.is_authorized_editor() {
        Ok(())
    } else {
        tracing::warn!(action, "Rejected unauthorized request");
        Err(BuilderError::Unauthorized(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity() {
        assert!(StaticIdentity::editor().is_authorized_editor());
        assert!(!StaticIdentity::viewer().is_authorized_editor());
        assert_eq!(StaticIdentity::default(), StaticIdentity::viewer());
    }

    #[test]
    fn test_require_editor() {
        assert!(require_editor(&StaticIdentity::editor(), "edit forms").is_ok());

        let err = require_editor(&StaticIdentity::viewer(), "edit forms").unwrap_err();
        assert_eq!(err.to_string(), "Not authorized to edit forms");
    }
}
