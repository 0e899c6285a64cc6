//! Display tree
//!
//! Builds a collapsible tree of labeled nodes from the typed syntax tree
//! and provides the list operations the viewer renders from.

mod build;
mod list;
mod stringify;

pub use build::{file_to_node, syntax_error_node};
pub use list::{flatten, node_at_index_mut, node_count, set_collapsed, to_rows, toggle};
pub use stringify::expr_to_string;

use serde::Serialize;

/// A single node in the display tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub label: String,
    pub children: Vec<DisplayNode>,
    /// Nesting depth the node renders at
    pub indent_level: usize,
    /// Whether the subtree is hidden in the flattened view
    pub collapsed: bool,
}

impl DisplayNode {
    pub fn new(label: impl Into<String>, indent_level: usize) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
            indent_level,
            collapsed: false,
        }
    }

    pub fn with_children(mut self, children: Vec<DisplayNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether this node has children (can be expanded/collapsed)
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Visible node in a flattened forest
#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a> {
    pub node: &'a DisplayNode,
    pub indent: usize,
}

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub text: String,
    pub indent: usize,
    pub collapsed: bool,
    /// Index into the flattened forest
    pub value: usize,
}

/// Complete display tree for one source blob, one root per file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    pub roots: Vec<DisplayNode>,
}

impl Forest {
    pub fn new(roots: Vec<DisplayNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, collapsed or not
    pub fn node_count(&self) -> usize {
        node_count(&self.roots)
    }

    pub fn flatten(&self) -> Vec<FlatNode<'_>> {
        flatten(&self.roots)
    }

    /// Toggle the node at a flattened index; see [`toggle`]
    pub fn toggle(&mut self, index: usize) {
        toggle(&mut self.roots, index);
    }

    pub fn set_collapsed(&mut self, index: usize, collapsed: bool) {
        set_collapsed(&mut self.roots, index, collapsed);
    }

    /// Flatten and render in one step
    pub fn rows(&self) -> Vec<Row> {
        to_rows(&self.flatten())
    }
}
