//! Source pipeline: archive blob → display forest
//!
//! One root per matching archive entry, in archive order. A file that
//! fails to parse becomes a single error leaf and the rest still build.

use std::fmt;

use crate::archive::Archive;
use crate::config::ViewerConfig;
use crate::syntax::GoParser;
use crate::tree::{file_to_node, syntax_error_node, Forest};

/// Archive-level failure; per-file syntax errors never surface here
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No archive entry ends in the configured suffix
    NoSourceFiles,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NoSourceFiles => write!(f, "no source files found"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Parse every source file in a txtar blob into a display forest
pub fn parse_source(blob: &str, config: &ViewerConfig) -> Result<Forest, SourceError> {
    let archive = Archive::parse(blob);
    let mut parser = GoParser::new();
    let mut roots = Vec::new();

    for file in archive.source_files(&config.source_suffix) {
        let root = match parser.parse(&file.name, &file.data) {
            Ok(ast) => {
                tracing::debug!(file = %file.name, decls = ast.decls.len(), "Parsed source file");
                file_to_node(&file.name, &ast)
            }
            Err(err) => {
                tracing::debug!(file = %file.name, "Syntax error: {}", err);
                syntax_error_node(&file.name, &err)
            }
        };
        roots.push(root);
    }

    if roots.is_empty() {
        tracing::debug!(
            entries = archive.files.len(),
            suffix = %config.source_suffix,
            "No matching source files"
        );
        return Err(SourceError::NoSourceFiles);
    }

    let forest = Forest::new(roots);
    tracing::info!(
        files = forest.roots.len(),
        nodes = forest.node_count(),
        "Built display forest"
    );
    Ok(forest)
}
