//! Category catalog client: paginated fetch and tree assembly.
//!
//! Layers, innermost first:
//! - [`domain`]: categories, the arena-backed [`domain::CategoryTree`] and its builder
//! - [`application`]: the paginated [`application::services::CatalogService`]
//! - [`infrastructure`]: HTTP transport and service wiring
//! - [`cli`]: argument parsing and command handlers

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;

pub use application::services::CatalogService;
pub use application::{ApplicationError, ApplicationResult, CancellationToken};
pub use domain::{Category, CategoryTree, DomainError, NodeRef, TreeBuilder};
