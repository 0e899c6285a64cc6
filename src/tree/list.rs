//! Flattening and collapse toggling
//!
//! The flattened index is the only addressing scheme: every lookup walks
//! the forest again, so indices always match a fresh [`flatten`].

use super::{DisplayNode, FlatNode, Row};

const EXPANDED_MARKER: &str = "[-] ";
const COLLAPSED_MARKER: &str = "[+] ";
const LEAF_PADDING: &str = "    ";

/// Depth-first pre-order walk that skips the children of collapsed nodes
pub fn flatten(nodes: &[DisplayNode]) -> Vec<FlatNode<'_>> {
    let mut out = Vec::new();
    flatten_into(nodes, &mut out);
    out
}

fn flatten_into<'a>(nodes: &'a [DisplayNode], out: &mut Vec<FlatNode<'a>>) {
    for node in nodes {
        out.push(FlatNode {
            node,
            indent: node.indent_level,
        });
        if !node.collapsed {
            flatten_into(&node.children, out);
        }
    }
}

/// Count every node regardless of collapse state
pub fn node_count(nodes: &[DisplayNode]) -> usize {
    nodes
        .iter()
        .map(|node| 1 + node_count(&node.children))
        .sum()
}

/// Get the node at a given flattened visible index
pub fn node_at_index_mut(nodes: &mut [DisplayNode], target: usize) -> Option<&mut DisplayNode> {
    let mut current = 0;
    find_visible(nodes, target, &mut current)
}

fn find_visible<'a>(
    nodes: &'a mut [DisplayNode],
    target: usize,
    current: &mut usize,
) -> Option<&'a mut DisplayNode> {
    for node in nodes {
        if *current == target {
            return Some(node);
        }
        *current += 1;
        if !node.collapsed {
            if let Some(found) = find_visible(&mut node.children, target, current) {
                return Some(found);
            }
        }
    }
    None
}

/// Invert the collapse flag of the node at `index`
///
/// Leaves and out-of-range indices are left untouched.
pub fn toggle(nodes: &mut [DisplayNode], index: usize) {
    if let Some(node) = node_at_index_mut(nodes, index) {
        if node.is_collapsible() {
            node.collapsed = !node.collapsed;
            tracing::trace!(index, collapsed = node.collapsed, "Toggled {}", node.label);
        }
    }
}

/// Set the collapse flag of the node at `index` (expander callbacks)
pub fn set_collapsed(nodes: &mut [DisplayNode], index: usize, collapsed: bool) {
    if let Some(node) = node_at_index_mut(nodes, index) {
        if node.is_collapsible() {
            node.collapsed = collapsed;
        }
    }
}

/// Render flattened nodes as list rows with expander markers
pub fn to_rows(flat: &[FlatNode<'_>]) -> Vec<Row> {
    flat.iter()
        .enumerate()
        .map(|(value, entry)| {
            let node = entry.node;
            let marker = match (node.is_collapsible(), node.collapsed) {
                (true, true) => COLLAPSED_MARKER,
                (true, false) => EXPANDED_MARKER,
                (false, _) => LEAF_PADDING,
            };
            Row {
                text: format!("{}{}", marker, node.label),
                indent: entry.indent,
                collapsed: node.collapsed,
                value,
            }
        })
        .collect()
}
