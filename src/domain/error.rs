//! Outline errors
//!
//! Every variant except `Corrupted` reports a refused operation: the outline is
//! left exactly as it was before the call.

use thiserror::Error;

use crate::domain::NodeId;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("the document root cannot be moved or attached")]
    IsRoot,

    #[error("node is a continuation, only chain heads can be restructured: {0:?}")]
    NotAHead(NodeId),

    #[error("node is not attached to a parent: {0:?}")]
    Detached(NodeId),

    #[error("node is already attached: {0:?}")]
    AlreadyAttached(NodeId),

    #[error("node is already at top level: {0:?}")]
    AlreadyTopLevel(NodeId),

    #[error("node has no siblings to indent under: {0:?}")]
    OnlyChild(NodeId),

    #[error("node has no preceding sibling: {0:?}")]
    NoPrecedingSibling(NodeId),

    #[error("node already at first index: {0:?}")]
    AlreadyFirst(NodeId),

    #[error("node already at last index: {0:?}")]
    AlreadyLast(NodeId),

    #[error("index {index} is out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("operation would make a node its own ancestor: {0:?}")]
    WouldCycle(NodeId),

    #[error("outline invariant violated: {0}")]
    Corrupted(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl OutlineError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for outline operations.
pub type OutlineResult<T> = Result<T, OutlineError>;
