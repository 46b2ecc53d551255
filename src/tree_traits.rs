/*
termtree view of an outline, for debugging output.

Continuation members are shown as siblings of their head, marked with `+`,
each carrying its own children.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{NodeId, Outline};

pub trait OutlineTreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl OutlineTreeConvert for Outline {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if self.get_node(self.root()).is_some_and(|root| root.children().is_empty()) {
            return Tree::new("Empty outline".to_string());
        }
        let mut tree = Tree::new(".".to_string());
        build_tree_representation(self, self.root(), &mut tree);
        tree
    }
}

fn label(outline: &Outline, id: NodeId) -> String {
    match outline.get_node(id) {
        Some(node) => {
            let text = if node.title().is_empty() { node.body() } else { node.title() };
            if node.is_continuation() {
                format!("+ {}", text)
            } else {
                text.to_string()
            }
        }
        None => String::new(),
    }
}

pub fn build_tree_representation(outline: &Outline, node_idx: NodeId, parent_tree: &mut Tree<String>) {
    let Some(node) = outline.get_node(node_idx) else {
        return;
    };
    for &child_idx in node.children() {
        for member in outline.chain(child_idx) {
            let mut member_tree = Tree::new(label(outline, member));
            build_tree_representation(outline, member, &mut member_tree);
            parent_tree.push(member_tree);
        }
    }
}
