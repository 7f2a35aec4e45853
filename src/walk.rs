//! Traversal strategies: pre-order, post-order and breadth-first.
//!
//! The set of strategies is closed and dispatched exhaustively through
//! [`Traversal`]; there is no dynamic strategy registry. All three iterators
//! keep explicit state (stack or queue) and are lazy, so dropping one
//! abandons the remaining traversal.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TreeError;
use crate::node::Node;

/// One of the three registered walk strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Depth-first, node before its children (the default).
    #[default]
    Pre,
    /// Depth-first, children before their node.
    Post,
    /// Level order via a FIFO queue.
    Breadth,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Post => "post",
            Self::Breadth => "breadth",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            "breadth" => Ok(Self::Breadth),
            other => Err(TreeError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Depth-first pre-order over a subtree.
pub struct PreOrderIter {
    stack: Vec<Node>,
}

impl PreOrderIter {
    pub(crate) fn new(start: Node) -> Self {
        Self { stack: vec![start] }
    }
}

impl Iterator for PreOrderIter {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children().into_iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Depth-first post-order over a subtree.
pub struct PostOrderIter {
    stack: Vec<(Node, bool)>,
}

impl PostOrderIter {
    pub(crate) fn new(start: Node) -> Self {
        Self {
            stack: vec![(start, false)],
        }
    }
}

impl Iterator for PostOrderIter {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, visited)) = self.stack.pop() {
            if visited {
                return Some(node);
            }
            self.stack.push((node.clone(), true));
            for child in node.children().into_iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Breadth-first (level order) over a subtree.
pub struct BreadthIter {
    queue: VecDeque<Node>,
}

impl BreadthIter {
    pub(crate) fn new(start: Node) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(start);
        Self { queue }
    }
}

impl Iterator for BreadthIter {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        for child in node.children() {
            self.queue.push_back(child);
        }
        Some(node)
    }
}

/// A running traversal, dispatching to the strategy's iterator.
pub enum Traversal {
    Pre(PreOrderIter),
    Post(PostOrderIter),
    Breadth(BreadthIter),
}

impl Traversal {
    pub(crate) fn new(start: Node, strategy: Strategy) -> Self {
        match strategy {
            Strategy::Pre => Self::Pre(PreOrderIter::new(start)),
            Strategy::Post => Self::Post(PostOrderIter::new(start)),
            Strategy::Breadth => Self::Breadth(BreadthIter::new(start)),
        }
    }
}

impl Iterator for Traversal {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Pre(iter) => iter.next(),
            Self::Post(iter) => iter.next(),
            Self::Breadth(iter) => iter.next(),
        }
    }
}
