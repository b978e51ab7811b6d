//! Generate command implementation.
//!
//! Reads the YAML rendering of a document and writes MDRF text.

use std::path::PathBuf;

use clap::Args;

use crate::converter::Converter;
use crate::error::Result;
use crate::options::Options;
use crate::output::{display_path, Printer, Tone};
use crate::validation::print_diagnostics;

/// Generate an MDRF document from its YAML rendering
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// YAML file describing the document
    #[arg(required = true)]
    pub input: PathBuf,

    /// Renumber threads and comments sequentially
    #[arg(long)]
    pub auto_numbering: bool,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs, mut options: Options, printer: &Printer) -> Result<()> {
    if args.auto_numbering {
        options.auto_numbering = true;
    }

    let source = super::read_input(&args.input)?;
    printer.report(Tone::Progress, "Generating", &display_path(&args.input));

    let converter = Converter::new().with_options(options);
    let text = match converter.generate_from_yaml(&source) {
        Ok(text) => text,
        Err(err) => {
            // Show every problem, not just the one that aborted generation.
            if let Ok(doc) = serde_yaml::from_str(&source) {
                print_diagnostics(&converter.validate(&doc), printer);
            }
            return Err(err);
        }
    };

    super::write_output(&text, args.output.as_deref(), printer)
}
