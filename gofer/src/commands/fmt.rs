use std::path::{Path, PathBuf};

use clap::Args;
use eyre::{Context, Result};
use gofer_codegen::Error;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct FmtCommand {
    /// Go files to format in place
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Check if files are formatted without making changes (exit 1 if not)
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    pub fn run(&self) -> Result<()> {
        let mut unformatted = Vec::new();

        for path in &self.files {
            let content = std::fs::read_to_string(path)
                .map_err(|source| Error::io(path, source))
                .unwrap_or_exit();
            let formatted = format(path, &content)?;

            if self.check {
                if content != formatted {
                    unformatted.push(path);
                } else {
                    println!("{} is formatted", path.display());
                }
            } else if content == formatted {
                println!("{} is already formatted", path.display());
            } else {
                std::fs::write(path, &formatted)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Formatted {}", path.display());
            }
        }

        if !unformatted.is_empty() {
            for path in unformatted {
                eprintln!("error: {} is not formatted", path.display());
            }
            eprintln!("Run `gofer fmt` to fix.");
            std::process::exit(1);
        }

        Ok(())
    }
}

fn format(path: &Path, content: &str) -> Result<String> {
    tracing::debug!(path = %path.display(), bytes = content.len(), "formatting");
    gofer_syntax::format_source(content)
        .with_context(|| format!("{}: unparsable Go source", path.display()))
}
