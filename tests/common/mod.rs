#![allow(dead_code)]

use outliner::util::testing;
use outliner::{NodeData, NodeId, Outline};

/// Node handles of the reference document built by [`sample_outline`].
pub struct Sample {
    pub h1: NodeId,
    pub h1a: NodeId,
    pub h1aa: NodeId,
    pub t1a_2: NodeId,
    pub t1_2: NodeId,
    pub h1b: NodeId,
    pub t1_3: NodeId,
    pub h2: NodeId,
}

/// Reference document:
///
/// ```text
/// * Heading 1
///   text 1-1
///   * Sub-Heading 1a
///     * Sub-Sub Heading 1aa
///     text 1a-2
///   text 1-2
///   * Sub-Heading 1b
///   text 1-3
/// * Heading 2
/// ```
///
/// `text 1-2` and `text 1-3` continue `Heading 1`, `text 1a-2` continues
/// `Sub-Heading 1a`, and `Sub-Heading 1b` is a child of `text 1-2`.
pub fn sample_outline() -> (Outline, Sample) {
    testing::init_test_setup();
    let mut outline = Outline::new();
    let root = outline.root();

    let h1 = node(&mut outline, "Heading 1", "text 1-1");
    let h1a = node(&mut outline, "Sub-Heading 1a", "text 1a-1");
    let h1aa = node(&mut outline, "Sub-Sub Heading 1aa", "text 1aa-1");
    let t1a_2 = node(&mut outline, "text 1a-2", "");
    let t1_2 = node(&mut outline, "text 1-2", "");
    let h1b = node(&mut outline, "Sub-Heading 1b", "text 1b-1");
    let t1_3 = node(&mut outline, "text 1-3", "");
    let h2 = node(&mut outline, "Heading 2", "text 2-1");

    outline.add_child(root, h1).unwrap();
    outline.add_child(h1, h1a).unwrap();
    outline.add_child(h1a, h1aa).unwrap();
    outline.add_continuation(h1a, t1a_2).unwrap();
    outline.add_continuation(h1, t1_2).unwrap();
    outline.add_child(t1_2, h1b).unwrap();
    outline.add_continuation(h1, t1_3).unwrap();
    outline.add_child(root, h2).unwrap();

    (
        outline,
        Sample {
            h1,
            h1a,
            h1aa,
            t1a_2,
            t1_2,
            h1b,
            t1_3,
            h2,
        },
    )
}

pub fn node(outline: &mut Outline, title: &str, body: &str) -> NodeId {
    outline.new_node(NodeData::new(title, body))
}

/// `(title, depth)` for every node in document order.
pub fn walk_titles(outline: &Outline) -> Vec<(String, usize)> {
    let mut visited = Vec::new();
    outline.walk(|_, node, depth| visited.push((node.title().to_string(), depth)));
    visited
}

pub fn titles(outline: &Outline, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| outline.get_node(id).unwrap().title().to_string())
        .collect()
}

pub fn children_titles(outline: &Outline, parent: NodeId) -> Vec<String> {
    let children = outline.get_node(parent).unwrap().children().to_vec();
    titles(outline, &children)
}

pub fn heads_in_order(outline: &Outline) -> Vec<NodeId> {
    outline
        .iter()
        .filter(|(_, node, _)| node.is_head())
        .map(|(id, _, _)| id)
        .collect()
}
