pub mod check;
pub mod completions;
pub mod generate;
pub mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{MdrfError, Result};
use crate::options::{Options, CONFIG_FILENAME};
use crate::output::{display_path, Printer, Tone};

/// mdrf - Markdown Diff Review Format converter
#[derive(Parser, Debug)]
#[command(name = "mdrf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./mdrf.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Spaces per nesting level in emitted YAML
    #[arg(long, global = true)]
    pub yaml_indent: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an MDRF document into YAML or JSON
    Parse(parse::ParseArgs),

    /// Generate an MDRF document from its YAML rendering
    Generate(generate::GenerateArgs),

    /// Parse and validate MDRF documents
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Cli {
    /// Resolve options: config file first, then command-line overrides.
    pub fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILENAME);
                if default_path.is_file() {
                    Options::load(default_path)?
                } else {
                    Options::default()
                }
            }
        };

        if let Some(indent) = self.yaml_indent {
            options.yaml_indent = indent;
        }

        Ok(options)
    }
}

/// Read a whole input file.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| MdrfError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read input: {}", e),
    })
}

/// Write converted text to a file, or to stdout when no path is given.
pub(crate) fn write_output(text: &str, output: Option<&Path>, printer: &Printer) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).map_err(|e| MdrfError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to write output: {}", e),
            })?;
            printer.report(Tone::Progress, "Wrote", &display_path(path));
        }
        None => print!("{}", text),
    }
    Ok(())
}
