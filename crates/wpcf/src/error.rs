//! CLI error types.

use wpcf_builder::BuilderError;
use wpcf_config::ConfigError;
use wpcf_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Builder(#[from] BuilderError),

    #[error("{0}")]
    Validation(String),
}
