use generational_arena::Arena;
use tracing::{debug, instrument};

use crate::domain::error::{OutlineError, OutlineResult};
use crate::domain::node::{NodeData, OutlineNode};
use crate::domain::NodeId;

/// Arena-based outline document.
///
/// All nodes live in one generational arena and refer to each other by
/// `NodeId`. The synthetic root owns the top-level headings; it is never
/// rendered and never visited by a whole-document walk.
#[derive(Debug, Clone)]
pub struct Outline {
    pub(crate) arena: Arena<OutlineNode>,
    pub(crate) root: NodeId,
}

impl Default for Outline {
    fn default() -> Self {
        Self::new()
    }
}

impl Outline {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(OutlineNode::new(NodeData::default()));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocates a detached node. Attach it with `add_child` or `add_continuation`.
    #[instrument(level = "trace", skip(self))]
    pub fn new_node(&mut self, data: NodeData) -> NodeId {
        self.arena.insert(OutlineNode::new(data))
    }

    pub fn get_node(&self, id: NodeId) -> Option<&OutlineNode> {
        self.arena.get(id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut OutlineNode> {
        self.arena.get_mut(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Number of nodes held, attached or not, excluding the root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_head(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(OutlineNode::is_head)
    }

    pub fn is_continuation(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some_and(OutlineNode::is_continuation)
    }

    /// Node lookup for ids the outline itself holds. A miss means the links are corrupt.
    pub(crate) fn node(&self, id: NodeId) -> &OutlineNode {
        match self.arena.get(id) {
            Some(node) => node,
            None => panic!("outline holds a dangling node id: {id:?}"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut OutlineNode {
        match self.arena.get_mut(id) {
            Some(node) => node,
            None => panic!("outline holds a dangling node id: {id:?}"),
        }
    }

    /// Lookup for ids handed in by callers.
    pub(crate) fn ensure(&self, id: NodeId) -> OutlineResult<&OutlineNode> {
        self.arena.get(id).ok_or(OutlineError::UnknownNode(id))
    }

    /// Structural owner: the parent for heads, the predecessor for continuation members.
    pub(crate) fn owner(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        node.parent.or(node.prev_continuation)
    }

    /// True if `ancestor` is `id` or owns it through any number of child or continuation links.
    pub(crate) fn owns_or_is(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.owner(cur);
        }
        false
    }

    /// Appends `child` to the end of `parent`'s children.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> OutlineResult<()> {
        self.check_attachable(parent, child)?;
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Inserts `child` at `index`, `0 <= index <= children.len()`.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> OutlineResult<()> {
        self.check_attachable(parent, child)?;
        let len = self.node(parent).children.len();
        if index > len {
            debug!("insert_child: index {} out of range ({} children)", index, len);
            return Err(OutlineError::IndexOutOfRange { index, len });
        }
        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    fn check_attachable(&self, owner: NodeId, new: NodeId) -> OutlineResult<()> {
        self.ensure(owner)?;
        let node = self.ensure(new)?;
        if new == self.root {
            return Err(OutlineError::IsRoot);
        }
        if !node.is_detached() {
            debug!("refusing to attach {:?}: already owned", new);
            return Err(OutlineError::AlreadyAttached(new));
        }
        if self.owns_or_is(new, owner) {
            debug!("refusing to attach {:?} below itself", new);
            return Err(OutlineError::WouldCycle(new));
        }
        Ok(())
    }

    /// Detaches `child` from `parent`, keeping the order of the remaining siblings.
    ///
    /// # Panics
    /// If `child` is not one of `parent`'s children. Callers only remove true children.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> OutlineResult<()> {
        self.ensure(parent)?;
        self.ensure(child)?;
        self.unlink_child(parent, child);
        Ok(())
    }

    pub(crate) fn unlink_child(&mut self, parent: NodeId, child: NodeId) -> usize {
        let index = self.child_position(parent, child);
        self.node_mut(parent).children.remove(index);
        self.node_mut(child).parent = None;
        index
    }

    /// Position of `child` in `parent`'s children, `None` if it is not there.
    pub fn index_child(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.arena
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == child)
    }

    pub(crate) fn child_position(&self, parent: NodeId, child: NodeId) -> usize {
        match self.index_child(parent, child) {
            Some(index) => index,
            None => panic!("{child:?} is not a child of {parent:?}"),
        }
    }

    /// Appends `new` to the end of the continuation chain that contains `node`.
    #[instrument(level = "debug", skip(self))]
    pub fn add_continuation(&mut self, node: NodeId, new: NodeId) -> OutlineResult<()> {
        if node == self.root {
            return Err(OutlineError::IsRoot);
        }
        self.check_attachable(node, new)?;
        let tail = self.chain_tail(node);
        self.node_mut(tail).next_continuation = Some(new);
        self.node_mut(new).prev_continuation = Some(tail);
        Ok(())
    }

    /// First node of the continuation chain containing `id`.
    pub fn chain_head(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(prev) = self.node(current).prev_continuation {
            current = prev;
        }
        current
    }

    /// Last node of the continuation chain containing `id`.
    pub fn chain_tail(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(next) = self.node(current).next_continuation {
            current = next;
        }
        current
    }

    /// The whole chain containing `id`, head first.
    pub fn chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut members = Vec::new();
        let mut current = Some(self.chain_head(id));
        while let Some(cur) = current {
            members.push(cur);
            current = self.node(cur).next_continuation;
        }
        members
    }

    /// Releases a node from its owner.
    ///
    /// A head leaves its parent's children. A continuation member is cut from
    /// its predecessor and takes its successors along as a detached chain.
    /// Children always stay with the node.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&mut self, id: NodeId) -> OutlineResult<()> {
        let node = self.ensure(id)?;
        let (parent, prev) = (node.parent, node.prev_continuation);
        if id == self.root {
            return Err(OutlineError::IsRoot);
        }
        if let Some(parent) = parent {
            self.unlink_child(parent, id);
        } else if let Some(prev) = prev {
            self.node_mut(prev).next_continuation = None;
            self.node_mut(id).prev_continuation = None;
        } else {
            return Err(OutlineError::Detached(id));
        }
        Ok(())
    }

    /// Destroys a detached node and everything it owns: children, their
    /// subtrees and its continuation successors. Returns how many nodes went.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_subtree(&mut self, id: NodeId) -> OutlineResult<usize> {
        let node = self.ensure(id)?;
        if id == self.root {
            return Err(OutlineError::IsRoot);
        }
        if !node.is_detached() {
            return Err(OutlineError::AlreadyAttached(id));
        }

        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
                stack.extend(node.next_continuation);
                removed += 1;
            }
        }
        debug!("delete_subtree: removed {} nodes", removed);
        Ok(removed)
    }

    /// Depth at which `walk` reports the node, `None` if it is not in the document.
    #[instrument(level = "trace", skip(self))]
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.arena.get(id)?;
        if id == self.root {
            return None;
        }
        let mut depth = 0;
        let mut current = self.chain_head(id);
        loop {
            let parent = self.node(current).parent?;
            if parent == self.root {
                return Some(depth);
            }
            depth += 1;
            current = self.chain_head(parent);
        }
    }

    /// Number of heading levels in the document, 0 for an empty one.
    #[instrument(level = "debug", skip(self))]
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(_, _, depth)| depth + 1).max().unwrap_or(0)
    }

    /// First node in document order whose title equals `title`.
    pub fn find_by_title(&self, title: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node, _)| node.data.title == title)
            .map(|(id, _, _)| id)
    }

    /// Verifies the parent/child and continuation links of every node.
    #[instrument(level = "debug", skip(self))]
    pub fn check_invariants(&self) -> OutlineResult<()> {
        let corrupted = |msg: String| Err(OutlineError::Corrupted(msg));

        let root = self.node(self.root);
        if root.parent.is_some() || root.prev_continuation.is_some() || root.next_continuation.is_some() {
            return corrupted("root is linked into the outline".to_string());
        }

        for (id, node) in self.arena.iter() {
            for &child in &node.children {
                let Some(c) = self.arena.get(child) else {
                    return corrupted(format!("{id:?} lists missing child {child:?}"));
                };
                if c.parent != Some(id) {
                    return corrupted(format!("{child:?} listed under {id:?} but names {:?}", c.parent));
                }
                if c.prev_continuation.is_some() {
                    return corrupted(format!("child {child:?} is also a continuation"));
                }
            }
            if let Some(parent) = node.parent {
                let listed = self
                    .arena
                    .get(parent)
                    .map_or(0, |p| p.children.iter().filter(|&&c| c == id).count());
                if listed != 1 {
                    return corrupted(format!("{id:?} appears {listed} times under its parent {parent:?}"));
                }
            }
            if let Some(next) = node.next_continuation {
                match self.arena.get(next) {
                    Some(n) if n.prev_continuation == Some(id) => {}
                    _ => return corrupted(format!("{id:?} -> {next:?} has no matching back-link")),
                }
            }
            if let Some(prev) = node.prev_continuation {
                match self.arena.get(prev) {
                    Some(p) if p.next_continuation == Some(id) => {}
                    _ => return corrupted(format!("{prev:?} <- {id:?} has no matching forward link")),
                }
                if node.parent.is_some() {
                    return corrupted(format!("continuation {id:?} has a parent"));
                }
            }

            // Every owner chain must end, otherwise something owns itself.
            let mut steps = 0;
            let mut current = Some(id);
            while let Some(cur) = current {
                steps += 1;
                if steps > self.arena.len() {
                    return corrupted(format!("{id:?} is part of an ownership cycle"));
                }
                current = self.arena.get(cur).and_then(|n| n.parent.or(n.prev_continuation));
            }
        }
        Ok(())
    }
}
