//! Source pipeline tests
//!
//! End-to-end: txtar blob → display forest → rows.

mod common;

use astview::config::ViewerConfig;
use astview::source::{parse_source, SourceError};
use common::*;

// ========================================================================
// Archive handling
// ========================================================================

#[test]
fn test_one_root_per_source_file_in_order() {
    let forest = forest(SAMPLE_ARCHIVE);
    let roots: Vec<_> = forest.roots.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(roots, vec!["File: main.go", "File: person.go"]);
    assert!(forest.roots.iter().all(|r| r.indent_level == 1));
}

#[test]
fn test_non_source_entries_are_skipped() {
    let blob = archive(&[
        ("README.md", "# hi\n"),
        ("a.go", "package a\n"),
        ("go.mod", "module example.com/a\n"),
    ]);
    let forest = forest(&blob);
    assert_eq!(forest.roots.len(), 1);
    assert_eq!(forest.roots[0].label, "File: a.go");
}

#[test]
fn test_no_source_files_is_an_error() {
    let blob = archive(&[("notes.txt", "nothing here\n")]);
    let err = parse_source(&blob, &ViewerConfig::default()).unwrap_err();
    assert_eq!(err, SourceError::NoSourceFiles);
    assert_eq!(err.to_string(), "no source files found");
}

#[test]
fn test_plain_go_text_is_not_an_archive() {
    let result = parse_source("package main\n\nfunc main() {}\n", &ViewerConfig::default());
    assert_eq!(result, Err(SourceError::NoSourceFiles));
}

// ========================================================================
// Syntax errors
// ========================================================================

#[test]
fn test_invalid_file_becomes_error_leaf() {
    let forest = forest(&archive(&[("bad.go", BROKEN_FILE)]));
    assert_eq!(forest.roots.len(), 1);
    let root = &forest.roots[0];
    assert!(
        root.label.starts_with("bad.go (error: bad.go:"),
        "unexpected label {}",
        root.label
    );
    assert!(root.label.ends_with(')'));
    assert!(root.children.is_empty());
    assert_eq!(root.indent_level, 1);
}

#[test]
fn test_valid_and_invalid_files_keep_blob_order() {
    let blob = archive(&[
        ("bad.go", BROKEN_FILE),
        ("good.go", "package main\n\nvar x int\n"),
    ]);
    let forest = forest(&blob);
    assert_eq!(forest.roots.len(), 2);
    assert!(forest.roots[0].label.starts_with("bad.go (error: "));
    assert_eq!(forest.roots[1].label, "File: good.go");
    assert!(!forest.roots[1].children.is_empty());
}

#[test]
fn test_missing_package_clause_message() {
    let forest = forest(&archive(&[("nopkg.go", "func main() {}\n")]));
    assert_eq!(
        forest.roots[0].label,
        "nopkg.go (error: nopkg.go:1:1: expected 'package', found 'func main() {}')"
    );
}

#[test]
fn test_empty_source_file_message() {
    let forest = forest("-- empty.go --\n");
    assert_eq!(
        forest.roots[0].label,
        "empty.go (error: empty.go:1:1: expected 'package', found 'EOF')"
    );
}

// ========================================================================
// Tree shape
// ========================================================================

#[test]
fn test_sample_method_shape() {
    let forest = forest(SAMPLE_ARCHIVE);
    let method = find(&forest.roots, "Method: (*Person) Greet").expect("method node");
    assert_eq!(child_labels(method), vec!["Results", "BlockStmt"]);
    let result = &method.children[0].children[0];
    assert_eq!(result.label, "Field: (embedded)");
    assert_eq!(child_labels(result), vec!["Type: string"]);
    assert_eq!(child_labels(&method.children[1]), vec!["ReturnStmt"]);
}

#[test]
fn test_sample_struct_shape() {
    let forest = forest(SAMPLE_ARCHIVE);
    let ty = find(&forest.roots, "Type: Person").expect("type node");
    let st = &ty.children[0];
    assert_eq!(st.label, "StructType");
    assert_eq!(child_labels(st), vec!["Field: Name", "Field: Age"]);
    assert_eq!(child_labels(&st.children[0]), vec!["Type: string"]);
    assert_eq!(child_labels(&st.children[1]), vec!["Type: int"]);
}

#[test]
fn test_sample_main_shape() {
    let forest = forest(SAMPLE_ARCHIVE);
    let main = &forest.roots[0];
    assert_eq!(
        child_labels(main),
        vec!["Package: main", "Imports", "Func: main"]
    );
    assert_eq!(child_labels(&main.children[1]), vec!["Import: \"fmt\""]);

    let call = find(&forest.roots, "CallExpr").expect("call node");
    assert_eq!(child_labels(call), vec!["Fun: fmt.Println", "Args"]);
    assert_eq!(child_labels(&call.children[1]), vec!["CallExpr"]);
    assert_eq!(
        child_labels(&call.children[1].children[0]),
        vec!["Fun: p.Greet"]
    );

    let lit = find(&forest.roots, "CompositeLit: Person").expect("literal node");
    assert_eq!(child_labels(lit), vec!["KeyValueExpr", "KeyValueExpr"]);
}

// ========================================================================
// Flatten and toggle
// ========================================================================

#[test]
fn test_flatten_counts_every_node_when_expanded() {
    let forest = forest(SAMPLE_ARCHIVE);
    assert_eq!(forest.flatten().len(), forest.node_count());
}

#[test]
fn test_collapse_file_root_hides_subtree() {
    let mut forest = forest(SAMPLE_ARCHIVE);
    forest.toggle(0);
    let labels = visible_labels(&forest);
    assert_eq!(labels[0], "File: main.go");
    assert_eq!(labels[1], "File: person.go");

    forest.toggle(0);
    assert_eq!(forest.flatten().len(), forest.node_count());
}

#[test]
fn test_toggle_twice_restores_flatten() {
    let mut forest = forest(SAMPLE_ARCHIVE);
    let before = visible_labels(&forest);
    let index = index_of(&forest, "Type: Person").unwrap();
    forest.toggle(index);
    assert!(visible_labels(&forest).len() < before.len());
    forest.toggle(index);
    assert_eq!(visible_labels(&forest), before);
}

#[test]
fn test_toggle_leaf_and_out_of_range_are_noops() {
    let mut forest = forest(SAMPLE_ARCHIVE);
    let pristine = forest.clone();
    let leaf = index_of(&forest, "Package: main").unwrap();
    forest.toggle(leaf);
    forest.toggle(forest.node_count());
    forest.toggle(usize::MAX);
    assert_eq!(forest, pristine);
}

#[test]
fn test_set_collapsed_is_idempotent() {
    let mut forest = forest(SAMPLE_ARCHIVE);
    let index = index_of(&forest, "File: person.go").unwrap();
    forest.set_collapsed(index, true);
    forest.set_collapsed(index, true);
    assert!(forest.roots[1].collapsed);
    forest.set_collapsed(index, false);
    assert!(!forest.roots[1].collapsed);
}

#[test]
fn test_rows_reflect_collapse_state() {
    let mut forest = forest(SAMPLE_ARCHIVE);
    let index = index_of(&forest, "File: person.go").unwrap();
    forest.toggle(index);
    let rows = forest.rows();
    let last = rows.last().unwrap();
    assert_eq!(last.text, "[+] File: person.go");
    assert!(last.collapsed);
    assert_eq!(last.value, rows.len() - 1);
    assert_eq!(rows[0].text, "[-] File: main.go");
    assert_eq!(rows[1].text, "    Package: main");
}

#[test]
fn test_reparse_resets_collapse_state() {
    let mut first = forest(SAMPLE_ARCHIVE);
    first.toggle(0);
    let second = forest(SAMPLE_ARCHIVE);
    assert!(!second.roots[0].collapsed);
}
