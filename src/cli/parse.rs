//! Parse command implementation.
//!
//! Reads an MDRF document and prints its object model as YAML or JSON.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::converter::Converter;
use crate::error::Result;
use crate::options::Options;
use crate::output::{counted, display_path, Printer, Tone};

/// Output encodings for the parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

/// Parse an MDRF document into YAML or JSON
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// MDRF file to parse
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output encoding
    #[arg(long, short, value_enum, default_value_t = Format::Yaml)]
    pub format: Format,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: ParseArgs, options: Options, printer: &Printer) -> Result<()> {
    let source = super::read_input(&args.input)?;
    printer.report(Tone::Progress, "Parsing", &display_path(&args.input));

    let converter = Converter::new().with_options(options);
    let doc = converter.parse_to_object(&source)?;
    printer.report(
        Tone::Detail,
        "Parsed",
        &format!(
            "{}, {}",
            counted(doc.files().count(), "file", "files"),
            counted(doc.comment_count(), "comment", "comments")
        ),
    );

    let rendered = match args.format {
        Format::Yaml => converter.to_yaml(&doc)?,
        Format::Json => {
            let mut json = converter.to_json(&doc)?;
            json.push('\n');
            json
        }
    };

    super::write_output(&rendered, args.output.as_deref(), printer)
}
