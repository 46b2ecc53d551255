use std::fmt;

use crate::domain::NodeId;

/// Payload of an outline node. The model never interprets these strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData {
    /// Headline text, conventionally empty for continuation text
    pub title: String,
    /// Free text following the headline
    pub body: String,
    /// User labels in insertion order, duplicates allowed
    pub tags: Vec<String>,
}

impl NodeData {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A node in the outline arena.
///
/// A node is owned either through its parent's `children` (then `parent` is set
/// and `prev_continuation` is not) or through `prev_continuation` (then `parent`
/// is `None`). A node with neither is detached from the document.
#[derive(Debug, Clone)]
pub struct OutlineNode {
    pub data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) next_continuation: Option<NodeId>,
    pub(crate) prev_continuation: Option<NodeId>,
}

impl OutlineNode {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
            next_continuation: None,
            prev_continuation: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn body(&self) -> &str {
        &self.data.body
    }

    pub fn tags(&self) -> &[String] {
        &self.data.tags
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn next_continuation(&self) -> Option<NodeId> {
        self.next_continuation
    }

    pub fn prev_continuation(&self) -> Option<NodeId> {
        self.prev_continuation
    }

    /// Heads start a continuation chain; they are the only navigation targets.
    pub fn is_head(&self) -> bool {
        self.prev_continuation.is_none()
    }

    pub fn is_continuation(&self) -> bool {
        self.prev_continuation.is_some()
    }

    /// Neither a child of anything nor linked behind another node.
    pub fn is_detached(&self) -> bool {
        self.parent.is_none() && self.prev_continuation.is_none()
    }
}
