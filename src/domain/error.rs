//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree invariants.
/// These are independent of transport and configuration concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("category (id: {id}) references nonexistent parent (id: {parent_id})")]
    DanglingParent { id: u32, parent_id: u32 },

    #[error("duplicate category id: {0}")]
    DuplicateId(u32),

    #[error("category id {0} is reserved for the root")]
    ReservedId(u32),

    #[error("cycle detected in category hierarchy at id: {0}")]
    CycleDetected(u32),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
