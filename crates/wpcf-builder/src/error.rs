//! Builder error type.

use wpcf_storage::StorageError;

/// Error from builder operations.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// Store operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Caller is not an authorized editor.
    #[error("Not authorized to {0}")]
    Unauthorized(&'static str),
    /// Removing the only remaining step.
    #[error("A form must keep at least one step")]
    LastStep,
    /// No step with this id in the draft.
    #[error("Step {0} not found")]
    StepNotFound(u32),
    /// Tag insertion without a selected step.
    #[error("No step is selected")]
    NoActiveStep,
    /// Requested step position is outside the form.
    #[error("Step {requested} is out of range (form has {count} steps)")]
    StepOutOfRange {
        /// 1-based position requested.
        requested: usize,
        /// Number of steps in the form.
        count: usize,
    },
    /// Input is not a preview address.
    #[error("Invalid preview address: {0}")]
    InvalidRoute(String),
}
