//! The tree node wrapper: queries, structural mutation and traversal.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::{Map, Value};
use tracing::instrument;

use crate::config::TreeConfig;
use crate::errors::{TreeError, TreeResult};
use crate::order::find_insert_index;
use crate::walk::{Strategy, Traversal};

/// A node of a parsed tree, wrapping one model record.
///
/// `Node` is a cheap-clone handle: clones share the same underlying node,
/// and equality is identity. Parents own their children through strong
/// references; the parent link is a weak back-reference, so a detached
/// subtree is owned by whoever holds its root handle.
///
/// The node tree is the single owning container for the model structure:
/// each node keeps its record's scalar attributes and the ordered child
/// list, and [`Node::model`] recomposes the children array from that list.
/// Node children and model children therefore cannot drift apart.
#[derive(Clone)]
pub struct Node {
    inner: Rc<RefCell<NodeInner>>,
}

struct NodeInner {
    config: Rc<TreeConfig>,
    /// Scalar attributes of the model, without the children property.
    record: Map<String, Value>,
    children: Vec<Node>,
    /// Whether the model carries the children property at all. A leaf
    /// parsed without one round-trips without it; `add_child` creates it.
    children_in_model: bool,
    parent: Weak<RefCell<NodeInner>>,
}

impl Node {
    pub(crate) fn new(
        config: Rc<TreeConfig>,
        record: Map<String, Value>,
        children_in_model: bool,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeInner {
                config,
                record,
                children: Vec::new(),
                children_in_model,
                parent: Weak::new(),
            })),
        }
    }

    /// Append `child` under `self` without ordering or validation.
    /// Used by the factory while wrapping an already-sorted model.
    pub(crate) fn link_child(&self, child: Node) {
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child);
    }

    pub fn config(&self) -> Rc<TreeConfig> {
        Rc::clone(&self.inner.borrow().config)
    }

    pub fn is_root(&self) -> bool {
        self.inner.borrow().parent.upgrade().is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.inner.borrow().children.is_empty()
    }

    /// The owning node, absent for a root.
    pub fn parent(&self) -> Option<Node> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Node { inner })
    }

    /// Handles to the child nodes, in sibling order.
    pub fn children(&self) -> Vec<Node> {
        self.inner.borrow().children.clone()
    }

    /// Position of this node among its siblings; 0 for a root.
    pub fn index(&self) -> usize {
        match self.parent() {
            None => 0,
            Some(parent) => {
                // a linked child is always present in its parent's list
                parent
                    .children()
                    .iter()
                    .position(|sibling| sibling == self)
                    .unwrap_or(0)
            }
        }
    }

    /// Nodes from the root down to this node, inclusive.
    pub fn path(&self) -> Vec<Node> {
        let mut path = vec![self.clone()];
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            path.push(node);
        }
        path.reverse();
        path
    }

    /// Height of the subtree rooted at this node (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Node::depth)
            .max()
            .unwrap_or(0)
    }

    /// A scalar attribute of the wrapped record.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().record.get(key).cloned()
    }

    /// Set a scalar attribute on the wrapped record, returning the previous
    /// value. The children property is managed exclusively through
    /// [`Node::add_child`] and friends and is rejected here.
    pub fn set(&self, key: impl Into<String>, value: Value) -> TreeResult<Option<Value>> {
        let key = key.into();
        let mut inner = self.inner.borrow_mut();
        if key == inner.config.children_property_name() {
            return Err(TreeError::ReservedProperty { name: key });
        }
        Ok(inner.record.insert(key, value))
    }

    /// Scalar attributes of the wrapped record, without the children
    /// property.
    pub fn record(&self) -> Map<String, Value> {
        self.inner.borrow().record.clone()
    }

    /// Recompose the full model value for this subtree.
    ///
    /// The children array is generated from the child nodes, in sibling
    /// order, and is present exactly when the parsed model carried one (or
    /// a mutation created it).
    pub fn model(&self) -> Value {
        let inner = self.inner.borrow();
        let mut record = inner.record.clone();
        if inner.children_in_model {
            let children: Vec<Value> = inner.children.iter().map(Node::model).collect();
            record.insert(
                inner.config.children_property_name().to_string(),
                Value::Array(children),
            );
        }
        Value::Object(record)
    }

    /// Link `child` under this node and return its handle.
    ///
    /// With a comparator configured the insertion position is determined by
    /// the comparator over the siblings' model values; otherwise the child
    /// is appended. Creates the model's children property if it was absent
    /// (replacing a non-array value of the same name).
    #[instrument(level = "debug", skip(self, child))]
    pub fn add_child(&self, child: Node) -> Node {
        let config = self.config();
        let index = if config.has_comparator() {
            let child_model = child.model();
            let siblings = self.children();
            find_insert_index(
                |a, b| config.compare(a, b),
                siblings.iter().map(Node::model),
                &child_model,
            )
        } else {
            self.inner.borrow().children.len()
        };
        self.insert_child(index, child)
    }

    /// Link `child` at an explicit position among the siblings.
    ///
    /// Valid positions are `0..=len`. Fails with
    /// [`TreeError::ComparatorConflict`] when a comparator is configured:
    /// explicit ordering and comparator ordering are mutually exclusive.
    #[instrument(level = "debug", skip(self, child))]
    pub fn add_child_at(&self, child: Node, index: usize) -> TreeResult<Node> {
        if self.config().has_comparator() {
            return Err(TreeError::ComparatorConflict {
                operation: "add a child at an explicit index",
            });
        }
        let len = self.inner.borrow().children.len();
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, max: len });
        }
        Ok(self.insert_child(index, child))
    }

    /// Move this node to `index` among its siblings, preserving the
    /// relative order of all others. A root only accepts index 0 (no-op).
    #[instrument(level = "debug", skip(self))]
    pub fn set_index(&self, index: usize) -> TreeResult<Node> {
        if self.config().has_comparator() {
            return Err(TreeError::ComparatorConflict {
                operation: "set the node index",
            });
        }
        let Some(parent) = self.parent() else {
            if index == 0 {
                return Ok(self.clone());
            }
            return Err(TreeError::IndexOutOfRange { index, max: 0 });
        };
        let mut parent_inner = parent.inner.borrow_mut();
        let len = parent_inner.children.len();
        if index >= len {
            return Err(TreeError::IndexOutOfRange {
                index,
                max: len - 1,
            });
        }
        if let Some(old) = parent_inner
            .children
            .iter()
            .position(|sibling| sibling == self)
        {
            let node = parent_inner.children.remove(old);
            parent_inner.children.insert(index, node);
        }
        Ok(self.clone())
    }

    /// Unlink this node from its parent and return it as the root of its
    /// own subtree. A root detaches as a no-op. The detached node stays
    /// fully valid and queryable; ownership moves to the caller's handle.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&self) -> Node {
        if let Some(parent) = self.parent() {
            {
                let mut parent_inner = parent.inner.borrow_mut();
                if let Some(position) = parent_inner
                    .children
                    .iter()
                    .position(|sibling| sibling == self)
                {
                    parent_inner.children.remove(position);
                }
            }
            self.inner.borrow_mut().parent = Weak::new();
        }
        self.clone()
    }

    fn insert_child(&self, index: usize, child: Node) -> Node {
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        let mut inner = self.inner.borrow_mut();
        if !inner.children_in_model {
            let name = inner.config.children_property_name().to_string();
            inner.record.remove(&name);
            inner.children_in_model = true;
        }
        inner.children.insert(index, child.clone());
        child
    }

    /// Lazily iterate the subtree in the given strategy's visit order.
    #[instrument(level = "trace", skip(self))]
    pub fn traverse(&self, strategy: Strategy) -> Traversal {
        Traversal::new(self.clone(), strategy)
    }

    /// Visit every node of the subtree in strategy order; a callback
    /// returning `false` stops the whole traversal immediately.
    pub fn walk<F>(&self, strategy: Strategy, mut callback: F)
    where
        F: FnMut(&Node) -> bool,
    {
        for node in self.traverse(strategy) {
            if !callback(&node) {
                break;
            }
        }
    }

    /// Every node satisfying `predicate`, in strategy visit order. A false
    /// predicate skips the node but never aborts the walk.
    pub fn all<F>(&self, strategy: Strategy, mut predicate: F) -> Vec<Node>
    where
        F: FnMut(&Node) -> bool,
    {
        self.traverse(strategy)
            .filter(|node| predicate(node))
            .collect()
    }

    /// The first node (in strategy visit order) satisfying `predicate`;
    /// traversal stops at the match.
    pub fn first<F>(&self, strategy: Strategy, mut predicate: F) -> Option<Node>
    where
        F: FnMut(&Node) -> bool,
    {
        self.traverse(strategy).find(|node| predicate(node))
    }
}

impl PartialEq for Node {
    /// Identity: two handles are equal iff they refer to the same node.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Node")
            .field("record", &inner.record)
            .field("children", &inner.children.len())
            .field("is_root", &inner.parent.upgrade().is_none())
            .finish()
    }
}
