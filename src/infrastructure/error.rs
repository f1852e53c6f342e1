//! Infrastructure-level errors raised at the network boundary

use thiserror::Error;

/// Connection, DNS, timeout or body-read failure of a single HTTP exchange.
///
/// Timeouts are deliberately not distinguished from other network failures.
#[derive(Error, Debug)]
#[error("{context}")]
pub struct TransportError {
    context: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Create a transport error with context.
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: None,
        }
    }

    /// Create a transport error wrapping the underlying cause.
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
