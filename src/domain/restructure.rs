//! Structural edits: outdent, indent, sibling reordering and slot swaps.
//!
//! Every precondition is checked before the first link changes, so a refused
//! edit leaves the outline as it was.

use tracing::{debug, instrument};

use crate::domain::arena::Outline;
use crate::domain::error::{OutlineError, OutlineResult};
use crate::domain::node::{NodeData, OutlineNode};
use crate::domain::NodeId;

impl Outline {
    /// Parent of `id`, provided `id` is a head that has one.
    fn attached_head(&self, id: NodeId) -> OutlineResult<NodeId> {
        let node = self.ensure(id)?;
        if id == self.root {
            return Err(OutlineError::IsRoot);
        }
        if node.is_continuation() {
            debug!("{:?}: only works for non-continuation nodes", id);
            return Err(OutlineError::NotAHead(id));
        }
        match node.parent {
            Some(parent) => Ok(parent),
            None => {
                debug!("{:?}: node must have a parent", id);
                Err(OutlineError::Detached(id))
            }
        }
    }

    /// The node `subject` is outdented relative to: `parent` itself when it has
    /// a parent, otherwise the first member of `parent`'s chain that does.
    fn outdent_anchor(&self, parent: NodeId) -> Option<NodeId> {
        if self.node(parent).parent.is_some() {
            return Some(parent);
        }
        self.chain(parent)
            .into_iter()
            .find(|&member| self.node(member).parent.is_some())
    }

    /// Outdent: makes `subject` the next sibling of the heading it sits under.
    ///
    /// `subject` keeps its children and continuation chain.
    #[instrument(level = "debug", skip(self))]
    pub fn move_up_tree(&mut self, subject: NodeId) -> OutlineResult<()> {
        let parent = self.attached_head(subject)?;
        let Some(anchor) = self.outdent_anchor(parent) else {
            debug!("{:?}: couldn't find parent's parent", subject);
            return Err(OutlineError::AlreadyTopLevel(subject));
        };
        let new_parent = match self.node(anchor).parent {
            Some(p) => p,
            None => panic!("outdent anchor {anchor:?} lost its parent"),
        };

        self.unlink_child(parent, subject);
        let index = self.child_position(new_parent, anchor);
        self.node_mut(new_parent).children.insert(index + 1, subject);
        self.node_mut(subject).parent = Some(new_parent);
        Ok(())
    }

    /// Indent: makes `subject` the last child of the tail of its preceding
    /// sibling's continuation chain.
    #[instrument(level = "debug", skip(self))]
    pub fn move_down_tree(&mut self, subject: NodeId) -> OutlineResult<()> {
        let parent = self.attached_head(subject)?;
        let siblings = &self.node(parent).children;
        if siblings.len() == 1 {
            debug!("{:?}: must have at least one sibling", subject);
            return Err(OutlineError::OnlyChild(subject));
        }
        let index = self.child_position(parent, subject);
        if index == 0 {
            debug!("{:?}: can't indent from here, try moving up first", subject);
            return Err(OutlineError::NoPrecedingSibling(subject));
        }

        let prior = self.node(parent).children[index - 1];
        let new_parent = self.chain_tail(prior);
        self.node_mut(parent).children.remove(index);
        self.node_mut(new_parent).children.push(subject);
        self.node_mut(subject).parent = Some(new_parent);
        Ok(())
    }

    /// Moves `subject` one position earlier among its siblings.
    #[instrument(level = "debug", skip(self))]
    pub fn make_prev_sibling(&mut self, subject: NodeId) -> OutlineResult<()> {
        let parent = self.attached_head(subject)?;
        let index = self.child_position(parent, subject);
        if index == 0 {
            debug!("{:?}: node already at first index", subject);
            return Err(OutlineError::AlreadyFirst(subject));
        }
        self.node_mut(parent).children.swap(index - 1, index);
        Ok(())
    }

    /// Moves `subject` one position later among its siblings.
    #[instrument(level = "debug", skip(self))]
    pub fn make_next_sibling(&mut self, subject: NodeId) -> OutlineResult<()> {
        let parent = self.attached_head(subject)?;
        let index = self.child_position(parent, subject);
        if index + 1 == self.node(parent).children.len() {
            debug!("{:?}: node already at last index", subject);
            return Err(OutlineError::AlreadyLast(subject));
        }
        self.node_mut(parent).children.swap(index, index + 1);
        Ok(())
    }

    /// Exchanges the tree positions of `left` and `right`.
    ///
    /// A position is the parent slot plus the continuation neighbours; each
    /// node keeps its own children. Either node may be detached, in which case
    /// the other one ends up detached.
    #[instrument(level = "debug", skip(self))]
    pub fn swap(&mut self, left: NodeId, right: NodeId) -> OutlineResult<()> {
        self.ensure(left)?;
        self.ensure(right)?;
        if left == self.root || right == self.root {
            return Err(OutlineError::IsRoot);
        }
        if left == right {
            return Ok(());
        }
        if self.nested_under(left, right) {
            return Err(OutlineError::WouldCycle(left));
        }
        if self.nested_under(right, left) {
            return Err(OutlineError::WouldCycle(right));
        }

        let placeholder = self.arena.insert(OutlineNode::new(NodeData::default()));
        self.replace_with(left, placeholder);
        self.replace_with(right, left);
        self.replace_with(placeholder, right);
        self.arena.remove(placeholder);
        Ok(())
    }

    /// True if `id` sits inside the children of `ancestor` or of anything those
    /// children own. Reaching `ancestor` through its continuation successor does
    /// not count: that successor moves with the slot in a swap.
    fn nested_under(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let node = self.node(current);
            if node.parent == Some(ancestor) {
                return true;
            }
            match node.parent.or(node.prev_continuation) {
                Some(owner) if owner != ancestor => current = owner,
                _ => return false,
            }
        }
    }

    /// Puts `dst` where `src` is: parent slot and continuation neighbours.
    ///
    /// `src` keeps stale copies of its links; the caller overwrites them next.
    fn replace_with(&mut self, src: NodeId, dst: NodeId) {
        let (parent, next, prev) = {
            let node = self.node(src);
            (node.parent, node.next_continuation, node.prev_continuation)
        };

        let node = self.node_mut(dst);
        node.parent = parent;
        node.next_continuation = next;
        node.prev_continuation = prev;

        if let Some(next) = next {
            self.node_mut(next).prev_continuation = Some(dst);
        }
        if let Some(prev) = prev {
            self.node_mut(prev).next_continuation = Some(dst);
        }
        if let Some(parent) = parent {
            let index = self.child_position(parent, src);
            self.node_mut(parent).children[index] = dst;
        }
    }
}
