//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (HttpTransport)
//! but are themselves concrete structs, not traits.

mod catalog;

pub use catalog::{
    CatalogEndpoint, CatalogService, AUTH_CLIENT_HEADER, AUTH_TOKEN_HEADER, FIRST_PAGE,
};
