//! Validation for review documents.
//!
//! Runs a suite of checks against a `Document` before it is turned into
//! text. Used by the generator (any error aborts generation) and by
//! `mdrf check`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::model::Document;
use crate::options::Options;
use crate::output::{counted, Printer, Tone};

/// Run all validation checks against the document.
pub fn validate_document(doc: &Document, options: &Options) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_title(doc, options));
    result.merge(checks::check_front_matter(doc, options));
    result.merge(checks::check_groups(doc, options));
    result.merge(checks::check_files(doc, options));
    result.merge(checks::check_threads(doc, options));
    result.merge(checks::check_comments(doc, options));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for diagnostic in result.iter() {
        printer.diagnostic(diagnostic);
    }

    let errors = counted(result.error_count(), "error", "errors");
    let warnings = counted(result.warning_count(), "warning", "warnings");

    if result.has_errors() {
        printer.report(Tone::Failure, "Failed", &format!("{errors}, {warnings}"));
    } else if result.has_warnings() {
        printer.report(Tone::Warning, "Passed", &format!("with {warnings}"));
    } else {
        printer.report(Tone::Progress, "Passed", "no issues");
    }
}
