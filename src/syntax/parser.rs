//! Tree-sitter parser for Go sources
//!
//! Owns a tree-sitter parser configured for Go, rejects trees that
//! contain ERROR or MISSING nodes, and hands clean trees to the lowering
//! pass.

use std::fmt;

use tree_sitter::{Node, Parser};

use super::ast;
use super::lower::Lowerer;

/// Longest snippet of offending source quoted in an error message
const SNIPPET_CHARS: usize = 24;

/// A syntax error in one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub file: String,
    /// 1-based line
    pub line: usize,
    /// 1-based byte column
    pub column: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(file: &str, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Error positioned at the start of a tree-sitter node
    pub(crate) fn at(file: &str, node: &Node, message: impl Into<String>) -> Self {
        let start = node.start_position();
        Self::new(file, start.row + 1, start.column + 1, message)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.file, self.line, self.column, self.message
        )
    }
}

impl std::error::Error for SyntaxError {}

/// First line of `text`, trimmed and shortened for error messages
pub(crate) fn snippet(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > SNIPPET_CHARS {
        let mut short: String = line.chars().take(SNIPPET_CHARS).collect();
        short.push_str("...");
        short
    } else {
        line.to_string()
    }
}

/// Find the first ERROR or MISSING node in pre-order
fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn error_for(file: &str, source: &str, node: &Node) -> SyntaxError {
    if node.is_missing() {
        let message = if node.is_named() {
            format!("expected {}", node.kind())
        } else {
            format!("expected '{}'", node.kind())
        };
        return SyntaxError::at(file, node, message);
    }

    let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
    let quoted = snippet(text);
    if quoted.is_empty() {
        SyntaxError::at(file, node, "unexpected EOF")
    } else {
        SyntaxError::at(file, node, format!("unexpected '{}'", quoted))
    }
}

/// Go parser (tree-sitter parsers are !Sync; create one per thread)
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_go::LANGUAGE.into()) {
            // Every parse reports a per-file error instead of panicking
            tracing::error!("Failed to set language for Go: {}", e);
        }
        Self { parser }
    }

    /// Parse one file into a typed syntax tree
    pub fn parse(&mut self, file_name: &str, contents: &str) -> Result<ast::File, SyntaxError> {
        let Some(tree) = self.parser.parse(contents, None) else {
            return Err(SyntaxError::new(file_name, 1, 1, "Go parser unavailable"));
        };

        let root = tree.root_node();
        if let Some(bad) = first_error(root) {
            let err = error_for(file_name, contents, &bad);
            tracing::trace!("Syntax error node {} in {}", bad.kind(), file_name);
            return Err(err);
        }

        Lowerer::new(file_name, contents).file(root)
    }
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a single file with a fresh parser
pub fn parse_file(file_name: &str, contents: &str) -> Result<ast::File, SyntaxError> {
    GoParser::new().parse(file_name, contents)
}
