//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::NotFound(_) => crate::exitcode::NOT_FOUND,
            CliError::Application(e) => match e {
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Transport(_) => crate::exitcode::UNAVAILABLE,
                ApplicationError::NonSuccessStatus { .. } => crate::exitcode::UNAVAILABLE,
                ApplicationError::Decode { .. } => crate::exitcode::DATAERR,
                ApplicationError::Cancelled { .. } => crate::exitcode::TEMPFAIL,
                ApplicationError::Domain(_) => crate::exitcode::DATAERR,
            },
        }
    }
}
