//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Id reserved for the synthetic root of every category tree.
pub const ROOT_ID: u32 = 0;

/// Name given to the synthetic root node.
pub const ROOT_NAME: &str = "root";

/// One taxonomy entry of the catalog.
///
/// Field names follow the catalog API wire format (`parent_id`, `is_visible`).
/// Categories are immutable once decoded; the tree wraps them, never edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Positive identifier, 0 is reserved for the synthetic root
    pub id: u32,
    /// Parent category id, 0 means "child of root"
    pub parent_id: u32,
    /// Display name, unique among siblings
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_visible: bool,
}

impl Category {
    pub fn new(id: u32, parent_id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            description: String::new(),
            is_visible: true,
        }
    }

    /// The category every tree hangs off. Never part of fetched data.
    pub fn root() -> Self {
        Self {
            id: ROOT_ID,
            parent_id: ROOT_ID,
            name: ROOT_NAME.to_string(),
            description: String::new(),
            is_visible: false,
        }
    }

    /// A category is a child iff it has a non-root parent.
    pub fn is_child(&self) -> bool {
        self.parent_id != ROOT_ID
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
