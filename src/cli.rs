//! Command-line argument parsing for the viewer
//!
//! Supports:
//! - Reading a txtar archive from a file or stdin
//! - Bundling loose source files into an archive
//! - Toggling nodes by flattened index before printing
//! - Text or JSON row output

use clap::Parser;
use std::path::PathBuf;

use crate::tree::Row;

/// Show the syntax tree of Go sources as a collapsible list
#[derive(Parser, Debug)]
#[command(name = "astview", version, about = "Show Go syntax trees as a collapsible list")]
pub struct CliArgs {
    /// A txtar archive, or loose source files; `-` or nothing reads stdin
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Only parse archive entries ending in this suffix (default: from config)
    #[arg(long, value_name = "EXT")]
    pub suffix: Option<String>,

    /// Toggle the node at flattened index N before printing (repeatable)
    #[arg(long = "toggle", value_name = "N")]
    pub toggle: Vec<usize>,

    /// Print rows as JSON instead of indented text
    #[arg(long)]
    pub json: bool,
}

/// Where the source blob comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Read a txtar blob from stdin
    Stdin,
    /// Read a txtar blob from a file
    Archive(PathBuf),
    /// Bundle loose files into an archive, one entry per file
    Files(Vec<PathBuf>),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: InputMode,
    /// Overrides the configured source suffix when set
    pub suffix: Option<String>,
    /// Flattened indices, applied in order
    pub toggles: Vec<usize>,
    pub json: bool,
}

const STDIN_PATH: &str = "-";
const ARCHIVE_EXTENSION: &str = "txtar";

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let is_stdin = |path: &PathBuf| path.as_os_str() == STDIN_PATH;

        let input = if self.paths.is_empty() || (self.paths.len() == 1 && is_stdin(&self.paths[0]))
        {
            InputMode::Stdin
        } else {
            if self.paths.iter().any(is_stdin) {
                return Err("Cannot mix stdin ('-') with file paths".to_string());
            }
            if let Some(dir) = self.paths.iter().find(|path| path.is_dir()) {
                return Err(format!("{} is a directory", dir.display()));
            }

            let is_archive = self.paths.len() == 1
                && self.paths[0]
                    .extension()
                    .is_some_and(|ext| ext == ARCHIVE_EXTENSION);
            if is_archive {
                InputMode::Archive(self.paths[0].clone())
            } else {
                InputMode::Files(self.paths)
            }
        };

        if let Some(suffix) = &self.suffix {
            if suffix.is_empty() {
                return Err("--suffix must not be empty".to_string());
            }
        }

        Ok(RunConfig {
            input,
            suffix: self.suffix,
            toggles: self.toggle,
            json: self.json,
        })
    }
}

/// Render rows for printing: indented text, or a JSON array
pub fn render_rows(rows: &[Row], json: bool) -> serde_json::Result<String> {
    if json {
        return serde_json::to_string_pretty(rows);
    }
    let mut out = String::new();
    for row in rows {
        // roots sit at indent 1
        out.push_str(&"  ".repeat(row.indent.saturating_sub(1)));
        out.push_str(&row.text);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(paths: &[&str]) -> CliArgs {
        CliArgs {
            paths: paths.iter().map(PathBuf::from).collect(),
            suffix: None,
            toggle: vec![],
            json: false,
        }
    }

    #[test]
    fn test_no_paths_reads_stdin() {
        let config = args(&[]).into_config().unwrap();
        assert_eq!(config.input, InputMode::Stdin);
    }

    #[test]
    fn test_dash_reads_stdin() {
        let config = args(&["-"]).into_config().unwrap();
        assert_eq!(config.input, InputMode::Stdin);
    }

    #[test]
    fn test_dash_mixed_with_files_is_rejected() {
        let result = args(&["-", "main.go"]).into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_txtar_path_is_archive() {
        let config = args(&["testdata/hello.txtar"]).into_config().unwrap();
        assert_eq!(
            config.input,
            InputMode::Archive(PathBuf::from("testdata/hello.txtar"))
        );
    }

    #[test]
    fn test_loose_files_are_bundled() {
        let config = args(&["main.go", "util.go"]).into_config().unwrap();
        assert_eq!(
            config.input,
            InputMode::Files(vec![PathBuf::from("main.go"), PathBuf::from("util.go")])
        );

        let single = args(&["main.go"]).into_config().unwrap();
        assert_eq!(single.input, InputMode::Files(vec![PathBuf::from("main.go")]));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = args(&[dir.path().to_str().unwrap()]).into_config();
        assert!(result.unwrap_err().contains("is a directory"));
    }

    #[test]
    fn test_options_carry_over() {
        let config = CliArgs {
            paths: vec![],
            suffix: Some(".gotmpl".into()),
            toggle: vec![3, 0],
            json: true,
        }
        .into_config()
        .unwrap();
        assert_eq!(config.suffix.as_deref(), Some(".gotmpl"));
        assert_eq!(config.toggles, vec![3, 0]);
        assert!(config.json);
    }

    #[test]
    fn test_empty_suffix_is_rejected() {
        let mut cli = args(&[]);
        cli.suffix = Some(String::new());
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn test_clap_parses_flags() {
        let cli = CliArgs::try_parse_from([
            "astview", "--toggle", "1", "--toggle", "4", "--json", "a.txtar",
        ])
        .unwrap();
        assert_eq!(cli.toggle, vec![1, 4]);
        assert!(cli.json);
        assert_eq!(cli.paths, vec![PathBuf::from("a.txtar")]);
    }

    #[test]
    fn test_render_text_indents_by_level() {
        let rows = vec![
            Row {
                text: "[-] File: a.go".into(),
                indent: 1,
                collapsed: false,
                value: 0,
            },
            Row {
                text: "    Package: a".into(),
                indent: 2,
                collapsed: false,
                value: 1,
            },
        ];
        let text = render_rows(&rows, false).unwrap();
        assert_eq!(text, "[-] File: a.go\n      Package: a\n");
    }

    #[test]
    fn test_render_json() {
        let rows = vec![Row {
            text: "    Package: a".into(),
            indent: 2,
            collapsed: false,
            value: 0,
        }];
        let json = render_rows(&rows, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["indent"], 2);
        assert_eq!(parsed[0]["text"], "    Package: a");
        assert_eq!(parsed[0]["collapsed"], false);
    }
}
