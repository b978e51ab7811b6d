//! Check command implementation.
//!
//! Parses each document and runs validation, reporting per-file results.

use std::path::PathBuf;

use clap::Args;

use crate::converter::Converter;
use crate::error::{MdrfError, Result};
use crate::options::Options;
use crate::output::{counted, display_path, Printer, Tone};
use crate::validation::print_diagnostics;

/// Parse and validate MDRF documents
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: CheckArgs, options: Options, printer: &Printer) -> Result<()> {
    let converter = Converter::new().with_options(options);
    let mut failed = 0;

    for path in &args.files {
        let display = display_path(path);
        printer.report(Tone::Progress, "Checking", &display);

        let outcome = super::read_input(path).and_then(|source| converter.parse_to_object(&source));
        let doc = match outcome {
            Ok(doc) => doc,
            Err(err) => {
                printer.report(Tone::Failure, "Error", &format!("{display}: {err}"));
                failed += 1;
                continue;
            }
        };

        let result = converter.validate(&doc);
        print_diagnostics(&result, printer);
        if result.has_errors() {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(MdrfError::Validation {
            message: format!(
                "{} of {} failed",
                counted(failed, "file", "files"),
                args.files.len()
            ),
            help: None,
        });
    }

    printer.report(
        Tone::Progress,
        "Finished",
        &counted(args.files.len(), "file", "files"),
    );
    Ok(())
}
