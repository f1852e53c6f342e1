//! Rendering of category trees for terminal output.

use termtree::Tree;

use crate::domain::{CategoryTree, NodeRef};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for NodeRef<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children().map(|c| c.to_tree_string()).collect();
        Tree::new(node_label(self)).with_leaves(leaves)
    }
}

impl TreeNodeConvert for CategoryTree {
    fn to_tree_string(&self) -> Tree<String> {
        self.root().to_tree_string()
    }
}

fn node_label(node: &NodeRef<'_>) -> String {
    let category = node.category();
    if node.is_root() {
        category.name.clone()
    } else if category.is_visible {
        category.to_string()
    } else {
        format!("{} [hidden]", category)
    }
}
