use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use astview::archive::{Archive, ArchiveFile};
use astview::cli::{render_rows, CliArgs, InputMode};
use astview::config::ViewerConfig;
use astview::source::parse_source;

fn main() -> Result<()> {
    astview::tracing::init();

    let run = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;
    let config = ViewerConfig::load().with_suffix(run.suffix.clone());

    let blob = read_input(&run.input)?;
    // an empty source shows an empty tree
    if blob.is_empty() {
        return Ok(());
    }

    let mut forest = parse_source(&blob, &config)?;
    for &index in &run.toggles {
        forest.toggle(index);
    }

    let output = render_rows(&forest.rows(), run.json).context("Failed to render rows")?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if run.json {
        writeln!(stdout)?;
    }
    Ok(())
}

fn read_input(input: &InputMode) -> Result<String> {
    match input {
        InputMode::Stdin => {
            let mut blob = String::new();
            io::stdin()
                .read_to_string(&mut blob)
                .context("Failed to read stdin")?;
            Ok(blob)
        }
        InputMode::Archive(path) => read_file(path),
        InputMode::Files(paths) => {
            let files = paths
                .iter()
                .map(|path| {
                    Ok(ArchiveFile {
                        name: path.display().to_string(),
                        data: read_file(path)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            tracing::debug!("Bundled {} loose files", files.len());
            Ok(Archive {
                comment: String::new(),
                files,
            }
            .format())
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
