//! Per-tree configuration: children property name and sibling ordering.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

/// Three-way comparator over whole model values, deciding sibling order.
pub type ModelComparator = dyn Fn(&Value, &Value) -> Ordering;

/// Settings shared by every node of one tree.
///
/// Immutable after construction. When a comparator is present, sibling
/// collections are kept continuously sorted and index-based mutation is
/// rejected; without one, siblings stay in insertion order.
pub struct TreeConfig {
    children_property_name: String,
    model_comparator: Option<Box<ModelComparator>>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self {
            children_property_name: "children".to_string(),
            model_comparator: None,
        }
    }

    /// Which model property holds the child models. Default: `"children"`.
    pub fn with_children_property(mut self, name: impl Into<String>) -> Self {
        self.children_property_name = name.into();
        self
    }

    /// Keep siblings sorted by `comparator` at all times.
    pub fn with_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + 'static,
    {
        self.model_comparator = Some(Box::new(comparator));
        self
    }

    pub fn children_property_name(&self) -> &str {
        &self.children_property_name
    }

    pub fn has_comparator(&self) -> bool {
        self.model_comparator.is_some()
    }

    /// Ordering of `a` relative to `b`; `Equal` when no comparator is set.
    pub(crate) fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match &self.model_comparator {
            Some(comparator) => comparator(a, b),
            None => Ordering::Equal,
        }
    }
}

impl fmt::Debug for TreeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeConfig")
            .field("children_property_name", &self.children_property_name)
            .field("has_comparator", &self.has_comparator())
            .finish()
    }
}
