//! Generic in-memory tree model.
//!
//! Wraps an arbitrarily nested record (a JSON object with a configurable
//! children property) into a tree of [`Node`]s linked to their parents,
//! with three traversal strategies, search, and structural mutation that
//! keeps the node tree and the model view in lockstep.
//!
//! ```
//! use rstree::{Strategy, Tree};
//! use serde_json::json;
//!
//! let root = Tree::new()
//!     .parse(json!({
//!         "id": 1,
//!         "children": [
//!             {"id": 11, "children": [{"id": 111}]},
//!             {"id": 12},
//!         ]
//!     }))
//!     .unwrap();
//!
//! let ids: Vec<_> = root
//!     .traverse(Strategy::Pre)
//!     .filter_map(|node| node.get("id"))
//!     .collect();
//! assert_eq!(ids, vec![json!(1), json!(11), json!(111), json!(12)]);
//! ```

pub mod config;
pub mod errors;
pub mod node;
pub mod order;
pub mod tree;
pub mod tree_traits;
pub mod util;
pub mod walk;

pub use config::{ModelComparator, TreeConfig};
pub use errors::{TreeError, TreeResult};
pub use node::Node;
pub use order::find_insert_index;
pub use tree::Tree;
pub use tree_traits::TreeDisplay;
pub use walk::{BreadthIter, PostOrderIter, PreOrderIter, Strategy, Traversal};
