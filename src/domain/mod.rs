//! Outline tree model
//!
//! Pure in-memory data structure: no I/O, no config, no rendering.

pub mod arena;
pub mod error;
pub mod node;
pub mod restructure;
pub mod walk;

/// Stable handle of a node inside an [`Outline`].
pub type NodeId = generational_arena::Index;

pub use arena::Outline;
pub use error::{OutlineError, OutlineResult};
pub use node::{NodeData, OutlineNode};
pub use walk::DocumentOrder;
