//! Application-level errors (wraps domain and transport errors)

use thiserror::Error;

use crate::domain::{Category, DomainError};
use crate::infrastructure::TransportError;

/// Application errors wrap domain errors and add fetch-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("cannot decode categories page {page}: {source}")]
    Decode {
        page: u32,
        /// Offending raw response body
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("categories page {page} returned non-success status {status}")]
    NonSuccessStatus {
        page: u32,
        status: i64,
        /// Whatever data the envelope carried despite the status
        partial: Vec<Category>,
    },

    #[error("fetch cancelled before page {page}")]
    Cancelled { page: u32 },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
