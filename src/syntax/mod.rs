//! Go grammar parsing
//!
//! Turns the text of one source file into a typed syntax tree, or a
//! syntax error carrying a human-readable message.
//!
//! ## Architecture
//!
//! ```text
//! source text → tree-sitter-go → concrete tree
//!             → (first ERROR / MISSING node?) → SyntaxError
//!             → lower → ast::File
//! ```

pub mod ast;
mod lower;
mod parser;

pub use parser::{parse_file, GoParser, SyntaxError};
