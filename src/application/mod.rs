//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod cancel;
pub mod envelope;
pub mod error;
pub mod services;

pub use cancel::CancellationToken;
pub use envelope::{CategoryPage, Pagination};
pub use error::{ApplicationError, ApplicationResult};
