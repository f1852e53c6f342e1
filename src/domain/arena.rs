//! Arena-backed category tree with an id index.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{Category, ROOT_ID};

/// Separator between category names in a lookup path.
pub const PATH_SEPARATOR: &str = "/";

/// Tree node in the arena. Children are owned top-down; there is no parent link.
#[derive(Debug)]
pub struct CategoryNode {
    pub category: Category,
    /// Indices of child nodes in the arena, in input order
    pub children: Vec<Index>,
}

impl CategoryNode {
    pub(crate) fn new(category: Category) -> Self {
        Self {
            category,
            children: Vec::new(),
        }
    }
}

/// Immutable category hierarchy.
///
/// Owns exactly one synthetic root (id 0) and an index from every category id,
/// root included, to its node. Built by [`crate::domain::TreeBuilder`] only, so
/// every indexed node is reachable from the root by exactly one path.
#[derive(Debug)]
pub struct CategoryTree {
    arena: Arena<CategoryNode>,
    root: Index,
    index: HashMap<u32, Index>,
}

impl CategoryTree {
    pub(crate) fn from_parts(
        arena: Arena<CategoryNode>,
        root: Index,
        index: HashMap<u32, Index>,
    ) -> Self {
        Self { arena, root, index }
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node_ref(self.root)
    }

    /// Number of nodes, the synthetic root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True when the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.arena.len() <= 1
    }

    /// O(1) lookup by category id. Id 0 yields the root.
    #[instrument(level = "trace", skip(self))]
    pub fn lookup_by_id(&self, id: u32) -> Option<NodeRef<'_>> {
        self.index.get(&id).map(|&idx| self.node_ref(idx))
    }

    /// Resolve a `/`-separated, root-relative path of category names.
    ///
    /// Names match case-sensitively. When siblings share a name the first one in
    /// child order wins. An empty path, or any segment that matches no child,
    /// yields `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn lookup_by_path(&self, path: &str) -> Option<NodeRef<'_>> {
        if path.is_empty() {
            return None;
        }

        let mut current = self.root;
        for segment in path.split(PATH_SEPARATOR) {
            let node = self.arena.get(current)?;
            current = node.children.iter().copied().find(|&child| {
                self.arena
                    .get(child)
                    .is_some_and(|c| c.category.name == segment)
            })?;
        }
        Some(self.node_ref(current))
    }

    /// Name path of a category, as accepted by [`Self::lookup_by_path`].
    ///
    /// The root has no path and yields `None`, as do unknown ids and categories
    /// with a name on the way down that contains [`PATH_SEPARATOR`], since no
    /// path can address them. With same-named siblings the path resolves to
    /// the first of them.
    #[instrument(level = "trace", skip(self))]
    pub fn path_of(&self, id: u32) -> Option<String> {
        if id == ROOT_ID {
            return None;
        }
        let target = *self.index.get(&id)?;

        let mut stack: Vec<(Index, Vec<&str>)> = vec![(self.root, Vec::new())];
        while let Some((idx, names)) = stack.pop() {
            let node = self.arena.get(idx)?;
            for &child in node.children.iter().rev() {
                let Some(child_node) = self.arena.get(child) else {
                    continue;
                };
                let mut child_names = names.clone();
                child_names.push(child_node.category.name.as_str());
                if child == target {
                    if child_names.iter().any(|name| name.contains(PATH_SEPARATOR)) {
                        return None;
                    }
                    return Some(child_names.join(PATH_SEPARATOR));
                }
                stack.push((child, child_names));
            }
        }
        None
    }

    /// Number of category levels below the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root).saturating_sub(1)
    }

    fn calculate_depth(&self, idx: Index) -> usize {
        if let Some(node) = self.arena.get(idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Pre-order traversal starting at the root, children left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    fn node_ref(&self, idx: Index) -> NodeRef<'_> {
        NodeRef { tree: self, idx }
    }
}

/// Borrowed handle to one node of a [`CategoryTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a CategoryTree,
    idx: Index,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a CategoryNode {
        // NodeRefs are only minted for indices the tree holds, and the tree is immutable.
        &self.tree.arena[self.idx]
    }

    pub fn category(&self) -> &'a Category {
        &self.node().category
    }

    pub fn id(&self) -> u32 {
        self.node().category.id
    }

    pub fn name(&self) -> &'a str {
        &self.node().category.name
    }

    pub fn is_root(&self) -> bool {
        self.idx == self.tree.root
    }

    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }

    /// Children in input order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&idx| tree.node_ref(idx))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.idx == other.idx
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("category", self.category())
            .field("children", &self.node().children.len())
            .finish()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a CategoryTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a CategoryTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let node = self.tree.arena.get(current)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(self.tree.node_ref(current))
    }
}
