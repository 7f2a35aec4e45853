use serde_json::Value;
use termtree::Tree;

use crate::node::Node;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for Node {
    /// Render the subtree as a termtree, labeling each node with the
    /// compact JSON of its scalar record.
    fn to_tree_string(&self) -> Tree<String> {
        let root = Value::Object(self.record()).to_string();

        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|child| child.to_tree_string())
            .collect();

        Tree::new(root).with_leaves(leaves)
    }
}
