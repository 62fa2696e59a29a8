//! CLI error types.

use prd_config::ConfigError;
use prd_session::{GeneratorError, SessionError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Generator(#[from] GeneratorError),

    #[error("{0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Validation(String),
}
