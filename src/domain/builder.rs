//! Tree builder: turns the flat category list into a rooted hierarchy.

use std::collections::{HashMap, HashSet};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::arena::{CategoryNode, CategoryTree};
use crate::domain::entities::{Category, ROOT_ID};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs category trees from flat category lists.
///
/// Every call to [`TreeBuilder::build`] owns a fresh root and index, so builders
/// can be reused and shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a tree from categories in any order.
    ///
    /// Siblings keep the order in which they appear in `categories`.
    /// Construction is all-or-nothing: nodes are linked only after every parent
    /// reference has been validated, and on error the partial arena is dropped.
    ///
    /// # Errors
    /// * [`DomainError::ReservedId`] if a category uses id 0
    /// * [`DomainError::DuplicateId`] if two categories share an id
    /// * [`DomainError::DanglingParent`] for the first category whose parent is missing
    /// * [`DomainError::CycleDetected`] if some categories only reach each other
    #[instrument(level = "debug", skip_all, fields(count = categories.len()))]
    pub fn build(&self, categories: Vec<Category>) -> DomainResult<CategoryTree> {
        let mut arena = Arena::with_capacity(categories.len() + 1);
        let root = arena.insert(CategoryNode::new(Category::root()));
        let mut index: HashMap<u32, Index> = HashMap::with_capacity(categories.len() + 1);
        index.insert(ROOT_ID, root);

        // First pass: one node per category, registered by id
        let mut order = Vec::with_capacity(categories.len());
        for category in categories {
            if category.id == ROOT_ID {
                return Err(DomainError::ReservedId(category.id));
            }
            if index.contains_key(&category.id) {
                return Err(DomainError::DuplicateId(category.id));
            }
            let (id, parent_id) = (category.id, category.parent_id);
            let idx = arena.insert(CategoryNode::new(category));
            index.insert(id, idx);
            order.push((id, parent_id, idx));
        }

        // Second pass: resolve every parent before linking anything
        let mut links = Vec::with_capacity(order.len());
        for &(id, parent_id, idx) in &order {
            let parent = index
                .get(&parent_id)
                .copied()
                .ok_or(DomainError::DanglingParent { id, parent_id })?;
            links.push((parent, idx));
        }

        for (parent, child) in links {
            if let Some(node) = arena.get_mut(parent) {
                node.children.push(child);
            }
        }

        // Parent cycles leave nodes that the root never reaches
        let reachable = reachable_from(&arena, root);
        if reachable.len() != arena.len() {
            if let Some(&(id, _, _)) = order.iter().find(|(_, _, idx)| !reachable.contains(idx)) {
                return Err(DomainError::CycleDetected(id));
            }
        }

        debug!("built category tree with {} nodes", arena.len());
        Ok(CategoryTree::from_parts(arena, root, index))
    }
}

fn reachable_from(arena: &Arena<CategoryNode>, root: Index) -> HashSet<Index> {
    let mut seen = HashSet::with_capacity(arena.len());
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        if !seen.insert(idx) {
            continue;
        }
        if let Some(node) = arena.get(idx) {
            stack.extend(node.children.iter().copied());
        }
    }
    seen
}
