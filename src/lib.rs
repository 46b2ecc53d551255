//! Outline tree model.
//!
//! A document is a tree of headline nodes. Each heading may be followed by
//! continuation nodes: body text at the same indentation, without a heading of
//! its own. [`Outline`] stores the nodes in an arena and offers the
//! document-order walk, heading navigation and the structural edits an outline
//! editor needs (indent, outdent, reorder, swap).
//!
//! ```
//! use outliner::{NodeData, Outline};
//!
//! let mut outline = Outline::new();
//! let a = outline.new_node(NodeData::new("A", "text a"));
//! let b = outline.new_node(NodeData::new("B", "text b"));
//! outline.add_child(outline.root(), a).unwrap();
//! outline.add_child(outline.root(), b).unwrap();
//!
//! outline.move_down_tree(b).unwrap();
//! assert_eq!(outline.get_node(b).unwrap().parent(), Some(a));
//! ```

pub mod config;
pub mod domain;
pub mod render;
pub mod tree_traits;
pub mod util;

pub use domain::{DocumentOrder, NodeData, NodeId, Outline, OutlineError, OutlineNode, OutlineResult};
