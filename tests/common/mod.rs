//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use astview::config::ViewerConfig;
use astview::source::parse_source;
use astview::tree::{DisplayNode, Forest};

/// The two-file sample the viewer opens with
pub const SAMPLE_ARCHIVE: &str = r#"Sample Go program
-- main.go --
package main

import "fmt"

func main() {
	p := &Person{Name: "Alice", Age: 30}
	fmt.Println(p.Greet())
}
-- person.go --
package main

type Person struct {
	Name string
	Age  int
}

func (p *Person) Greet() string {
	return "Hello, " + p.Name
}
"#;

/// A file that fails to parse
pub const BROKEN_FILE: &str = "package main\n\nfunc main() {\n\tx := \n}\n";

/// Build a txtar blob from (name, data) pairs
pub fn archive(files: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (name, data) in files {
        out.push_str(&format!("-- {} --\n{}", name, data));
        if !data.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Parse a blob with the default configuration, panicking on failure
pub fn forest(blob: &str) -> Forest {
    parse_source(blob, &ViewerConfig::default()).expect("blob should contain source files")
}

/// Labels of the visible rows, in order
pub fn visible_labels(forest: &Forest) -> Vec<String> {
    forest
        .flatten()
        .iter()
        .map(|entry| entry.node.label.clone())
        .collect()
}

/// Labels of a node's direct children
pub fn child_labels(node: &DisplayNode) -> Vec<&str> {
    node.children.iter().map(|c| c.label.as_str()).collect()
}

/// First node (pre-order) whose label equals `label`
pub fn find<'a>(nodes: &'a [DisplayNode], label: &str) -> Option<&'a DisplayNode> {
    nodes.iter().find_map(|node| {
        if node.label == label {
            Some(node)
        } else {
            find(&node.children, label)
        }
    })
}

/// Flattened index of the first visible node with `label`
pub fn index_of(forest: &Forest, label: &str) -> Option<usize> {
    forest
        .flatten()
        .iter()
        .position(|entry| entry.node.label == label)
}
