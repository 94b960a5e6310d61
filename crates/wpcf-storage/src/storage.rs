//! Form store trait and error types.
//!
//! Provides the [`FormStore`] trait for persisting form definitions, along
//! with [`StorageError`] for unified error handling across backends.

use std::path::PathBuf;

use crate::form::FormDefinition;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Form does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// A form with the same id already exists.
    AlreadyExists,
    /// Invalid form identifier.
    InvalidId,
    /// Stored record could not be decoded, or a record violates model rules.
    InvalidRecord,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Operation timed out.
    Timeout,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
#[derive(Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (not found, invalid id, corrupt record).
    #[default]
    Permanent,
    /// Retry immediately (timeout, interrupted write).
    Temporary,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Form id context (if applicable).
    pub form_id: Option<String>,
    /// Backend location context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            form_id: None,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach form id context.
    #[must_use]
    pub fn with_form_id(mut self, id: impl Into<String>) -> Self {
        self.form_id = Some(id.into());
        self
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error for a form id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_form_id(id)
    }

    /// Create an already-exists error for a form id.
    #[must_use]
    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::AlreadyExists).with_form_id(id)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => StorageErrorKind::AlreadyExists,
            std::io::ErrorKind::TimedOut => StorageErrorKind::Timeout,
            _ => StorageErrorKind::Other,
        };
        let status = match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted => {
                ErrorStatus::Temporary
            }
            _ => ErrorStatus::Permanent,
        };
        let mut error = Self::new(kind).with_status(status).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (form: abc) (path: /foo/abc.json)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Form not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::AlreadyExists => "Form already exists",
            StorageErrorKind::InvalidId => "Invalid form id",
            StorageErrorKind::InvalidRecord => "Invalid form record",
            StorageErrorKind::Unavailable => "Unavailable",
            StorageErrorKind::Timeout => "Timeout",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(id) = &self.form_id {
            write!(f, " (form: {id})")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Check the model rules every backend enforces before writing.
///
/// # Errors
///
/// Returns [`StorageErrorKind::InvalidId`] for an empty id and
/// [`StorageErrorKind::InvalidRecord`] when step ids collide.
pub fn validate_form(form: &FormDefinition) -> Result<(), StorageError> {
    if form.id.trim().is_empty() {
        return Err(StorageError::new(StorageErrorKind::InvalidId));
    }
    if !form.has_unique_step_ids() {
        return Err(StorageError::new(StorageErrorKind::InvalidRecord).with_form_id(&form.id));
    }
    Ok(())
}

/// Persistence for form definitions.
///
/// Step content is stored verbatim: a form read back after `create` or
/// `update` is equal to the one written.
pub trait FormStore: Send + Sync {
    /// Return all stored forms. Ordering is backend-defined but stable.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be listed.
    fn list(&self) -> Result<Vec<FormDefinition>, StorageError>;

    /// Fetch one form by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if no form has this id.
    fn get(&self, id: &str) -> Result<FormDefinition, StorageError> {
        self.list()?
            .into_iter()
            .find(|form| form.id == id)
            .ok_or_else(|| StorageError::not_found(id))
    }

    /// Store a new form.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::AlreadyExists`] if the id is taken, or a
    /// validation error from [`validate_form`].
    fn create(&self, form: &FormDefinition) -> Result<(), StorageError>;

    /// Replace an existing form.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if the form does not exist, or
    /// a validation error from [`validate_form`].
    fn update(&self, form: &FormDefinition) -> Result<(), StorageError>;

    /// Remove a form.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] if the form does not exist.
    fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Check if a form exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }
}
