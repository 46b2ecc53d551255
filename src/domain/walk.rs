//! Document-order traversal and heading navigation.
//!
//! Document order: a node, then each child subtree one level deeper, then the
//! node's continuation successor at the same depth. Continuation members are
//! visited like any other node, with their own children.

use tracing::instrument;

use crate::domain::arena::Outline;
use crate::domain::error::OutlineResult;
use crate::domain::node::OutlineNode;
use crate::domain::NodeId;

/// Iterator over `(id, node, depth)` in document order.
pub struct DocumentOrder<'a> {
    outline: &'a Outline,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> DocumentOrder<'a> {
    fn new(outline: &'a Outline, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if start == outline.root() {
            // The root is never visited; its children are the top level.
            for &child in outline.node(start).children.iter().rev() {
                stack.push((child, 0));
            }
        } else {
            stack.push((start, 0));
        }
        Self { outline, stack }
    }
}

impl<'a> Iterator for DocumentOrder<'a> {
    type Item = (NodeId, &'a OutlineNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (current, depth) = self.stack.pop()?;
        let node = self.outline.node(current);
        // Pushed first so it pops after every child subtree.
        if let Some(next) = node.next_continuation {
            self.stack.push((next, depth));
        }
        for &child in node.children.iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((current, node, depth))
    }
}

impl Outline {
    /// Every node of the document in document order.
    pub fn iter(&self) -> DocumentOrder<'_> {
        DocumentOrder::new(self, self.root)
    }

    /// Document order starting at `start`, which is visited at depth 0 unless it is the root.
    pub fn iter_from(&self, start: NodeId) -> OutlineResult<DocumentOrder<'_>> {
        self.ensure(start)?;
        Ok(DocumentOrder::new(self, start))
    }

    /// Invokes `visitor(id, node, depth)` once per document node in document order.
    #[instrument(level = "trace", skip(self, visitor))]
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, &OutlineNode, usize),
    {
        for (id, node, depth) in self.iter() {
            visitor(id, node, depth);
        }
    }

    /// Like `walk`, for the part of the outline reachable from `start`.
    #[instrument(level = "trace", skip(self, visitor))]
    pub fn walk_from<F>(&self, start: NodeId, mut visitor: F) -> OutlineResult<()>
    where
        F: FnMut(NodeId, &OutlineNode, usize),
    {
        for (id, node, depth) in self.iter_from(start)? {
            visitor(id, node, depth);
        }
        Ok(())
    }

    /// The head following `subject` in document order.
    ///
    /// Continuation members are skipped. `None` when `subject` is the last
    /// head or not part of the document.
    #[instrument(level = "debug", skip(self))]
    pub fn next_head(&self, subject: NodeId) -> Option<NodeId> {
        self.iter()
            .skip_while(|(id, _, _)| *id != subject)
            .skip(1)
            .find(|(_, node, _)| node.is_head())
            .map(|(id, _, _)| id)
    }

    /// The head preceding `subject` in document order.
    ///
    /// `None` when `subject` is the first head or not part of the document.
    #[instrument(level = "debug", skip(self))]
    pub fn prev_head(&self, subject: NodeId) -> Option<NodeId> {
        let mut last = None;
        for (id, node, _) in self.iter() {
            if id == subject {
                return last;
            }
            if node.is_head() {
                last = Some(id);
            }
        }
        None
    }
}
