//! Text archives (txtar)
//!
//! A txtar archive is a free-text comment followed by zero or more files,
//! each introduced by a marker line:
//!
//! ```text
//! comment text
//! -- main.go --
//! package main
//! -- util/strings.go --
//! package util
//! ```
//!
//! Parsing never fails: text that doesn't look like a marker line is data.

const MARKER: &str = "-- ";
const MARKER_END: &str = " --";
const NEWLINE_MARKER: &str = "\n-- ";

/// One named file inside an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    pub name: String,
    pub data: String,
}

/// Parsed archive: leading comment plus files in blob order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    pub comment: String,
    pub files: Vec<ArchiveFile>,
}

impl Archive {
    /// Split a text blob into comment and files
    pub fn parse(text: &str) -> Self {
        let (comment, mut next) = find_file_marker(text);
        let mut files = Vec::new();
        while let Some((name, rest)) = next {
            let (data, after) = find_file_marker(rest);
            files.push(ArchiveFile {
                name: name.to_string(),
                data,
            });
            next = after;
        }
        Self { comment, files }
    }

    /// Serialize back into txtar text
    pub fn format(&self) -> String {
        let mut out = fix_newline(&self.comment);
        for file in &self.files {
            out.push_str(MARKER);
            out.push_str(&file.name);
            out.push_str(MARKER_END);
            out.push('\n');
            out.push_str(&fix_newline(&file.data));
        }
        out
    }

    /// Files whose name ends in `suffix`, in archive order
    pub fn source_files<'a>(&'a self, suffix: &'a str) -> impl Iterator<Item = &'a ArchiveFile> {
        self.files
            .iter()
            .filter(move |file| file.name.ends_with(suffix))
    }
}

/// Text up to the next marker line, plus that marker's name and the rest
///
/// With no further marker the whole input is returned, newline-terminated.
fn find_file_marker(text: &str) -> (String, Option<(&str, &str)>) {
    let mut i = 0;
    loop {
        if let Some((name, after)) = parse_marker(&text[i..]) {
            return (text[..i].to_string(), Some((name, after)));
        }
        match text[i..].find(NEWLINE_MARKER) {
            // skip past the newline to the candidate marker
            Some(j) => i += j + 1,
            None => return (fix_newline(text), None),
        }
    }
}

/// Name and following text if `text` starts with a marker line
fn parse_marker(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with(MARKER) {
        return None;
    }
    let (line, after) = match text.find('\n') {
        Some(end) => (&text[..end], &text[end + 1..]),
        None => (text, ""),
    };
    let line = line.strip_suffix('\r').unwrap_or(line);
    if !line.ends_with(MARKER_END) || line.len() < MARKER.len() + MARKER_END.len() {
        return None;
    }
    let name = line[MARKER.len()..line.len() - MARKER_END.len()].trim();
    if name.is_empty() {
        return None;
    }
    Some((name, after))
}

fn fix_newline(data: &str) -> String {
    let mut out = data.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(archive: &Archive) -> Vec<&str> {
        archive.files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_comment_and_files() {
        let archive = Archive::parse(
            "a comment\nspanning lines\n-- main.go --\npackage main\n-- README --\nhello\n",
        );
        assert_eq!(archive.comment, "a comment\nspanning lines\n");
        assert_eq!(names(&archive), vec!["main.go", "README"]);
        assert_eq!(archive.files[0].data, "package main\n");
        assert_eq!(archive.files[1].data, "hello\n");
    }

    #[test]
    fn test_no_markers_is_all_comment() {
        let archive = Archive::parse("package main\n\nfunc main() {}");
        assert!(archive.files.is_empty());
        assert_eq!(archive.comment, "package main\n\nfunc main() {}\n");
    }

    #[test]
    fn test_empty_input() {
        let archive = Archive::parse("");
        assert_eq!(archive, Archive::default());
    }

    #[test]
    fn test_marker_on_first_line() {
        let archive = Archive::parse("-- a.go --\npackage a\n");
        assert_eq!(archive.comment, "");
        assert_eq!(names(&archive), vec!["a.go"]);
    }

    #[test]
    fn test_trailing_newline_added_to_last_file() {
        let archive = Archive::parse("-- a.go --\npackage a\n-- b.go --\npackage b");
        assert_eq!(archive.files[0].data, "package a\n");
        assert_eq!(archive.files[1].data, "package b\n");
    }

    #[test]
    fn test_empty_file_data() {
        let archive = Archive::parse("-- empty.go --\n-- b.go --\nx\n");
        assert_eq!(archive.files[0].data, "");
        assert_eq!(archive.files[1].data, "x\n");
    }

    #[test]
    fn test_marker_edge_cases() {
        // too short, missing end, empty name: all plain data
        let archive = Archive::parse("-- --\n--  --\n-- half\n--no-space --\n");
        assert!(archive.files.is_empty());

        // names are trimmed; CRLF marker lines are accepted
        let archive = Archive::parse("--   spaced.go   --\r\nx\n-- b --");
        assert_eq!(names(&archive), vec!["spaced.go", "b"]);
        assert_eq!(archive.files[0].data, "x\n");
        assert_eq!(archive.files[1].data, "");
    }

    #[test]
    fn test_marker_text_mid_line_is_data() {
        let archive = Archive::parse("-- a --\nx -- b --\n");
        assert_eq!(names(&archive), vec!["a"]);
        assert_eq!(archive.files[0].data, "x -- b --\n");
    }

    #[test]
    fn test_format_then_parse() {
        let archive = Archive {
            comment: "bundle".into(),
            files: vec![
                ArchiveFile {
                    name: "main.go".into(),
                    data: "package main\n".into(),
                },
                ArchiveFile {
                    name: "dir/util.go".into(),
                    data: "package util".into(),
                },
            ],
        };
        let text = archive.format();
        assert_eq!(
            text,
            "bundle\n-- main.go --\npackage main\n-- dir/util.go --\npackage util\n"
        );
        let parsed = Archive::parse(&text);
        assert_eq!(parsed.comment, "bundle\n");
        assert_eq!(names(&parsed), vec!["main.go", "dir/util.go"]);
        assert_eq!(parsed.files[1].data, "package util\n");
    }

    #[test]
    fn test_source_files_filters_by_suffix() {
        let archive = Archive::parse("-- a.go --\n-- notes.txt --\n-- b.go --\n");
        let go: Vec<_> = archive.source_files(".go").map(|f| f.name.as_str()).collect();
        assert_eq!(go, vec!["a.go", "b.go"]);
        assert_eq!(archive.source_files(".rs").count(), 0);
    }
}
