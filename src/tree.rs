//! Tree factory: wrap a nested model value into a node tree.

use std::rc::Rc;

use serde_json::Value;
use tracing::instrument;

use crate::config::TreeConfig;
use crate::errors::{TreeError, TreeResult};
use crate::node::Node;

/// Factory for node trees, holding the configuration every node of a
/// parsed tree will share.
#[derive(Debug)]
pub struct Tree {
    config: Rc<TreeConfig>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A factory with the default configuration: children under
    /// `"children"`, siblings in insertion order.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Recursively wrap `model` into a node tree and return the root.
    ///
    /// `model` and every descendant under the configured children property
    /// must be objects. When a comparator is configured, each level's child
    /// values are stable-sorted before wrapping, so equal-comparing
    /// siblings keep their original relative order.
    #[instrument(level = "debug", skip(self, model))]
    pub fn parse(&self, model: Value) -> TreeResult<Node> {
        self.parse_value(model)
    }

    fn parse_value(&self, model: Value) -> TreeResult<Node> {
        let mut record = match model {
            Value::Object(record) => record,
            other => {
                return Err(TreeError::ModelNotObject {
                    kind: value_kind(&other),
                })
            }
        };

        let property = self.config.children_property_name();
        // A children property that is not an array is plain data: put it
        // back and treat the node as a leaf.
        let raw_children = match record.remove(property) {
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                record.insert(property.to_string(), other);
                None
            }
            None => None,
        };

        match raw_children {
            Some(mut items) => {
                if self.config.has_comparator() {
                    items.sort_by(|a, b| self.config.compare(a, b));
                }
                let node = Node::new(Rc::clone(&self.config), record, true);
                for item in items {
                    let child = self.parse_value(item)?;
                    node.link_child(child);
                }
                Ok(node)
            }
            None => Ok(Node::new(Rc::clone(&self.config), record, false)),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
