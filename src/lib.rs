//! astview - Go syntax trees as collapsible lists
//!
//! This crate turns a txtar blob of Go sources into a forest of labeled
//! display nodes and provides the flatten / toggle operations a list
//! view renders from.

pub mod archive;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod source;
pub mod syntax;
pub mod tracing;
pub mod tree;

// Re-export commonly used types
pub use archive::Archive;
pub use config::ViewerConfig;
pub use source::{parse_source, SourceError};
pub use tree::{DisplayNode, Forest, Row};
