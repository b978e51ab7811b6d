//! Stderr reporting for the `mdrf` binary.
//!
//! Report lines put a right-aligned verb before the message, e.g.
//! `     Parsing review.md`. Converted documents are the only thing that goes
//! to stdout.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::{Diagnostic, Severity};

const VERB_WIDTH: usize = 12;
const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

/// Colour of a report line's verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Work starting or finished (green).
    Progress,
    /// Counts and other details (cyan).
    Detail,
    Warning,
    Failure,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Progress => "\x1b[1;32m",
            Tone::Detail => "\x1b[1;36m",
            Tone::Warning => "\x1b[1;33m",
            Tone::Failure => "\x1b[1;31m",
        }
    }
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Tone::Warning,
            Severity::Error => Tone::Failure,
        }
    }
}

/// Writes report lines and validation diagnostics to stderr.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// Colours output only when stderr is a terminal.
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn report(&self, tone: Tone, verb: &str, message: &str) {
        self.emit(&[self.report_line(tone, verb, message)]);
    }

    /// Print `severity[code]: message`, then the help text if there is one.
    pub fn diagnostic(&self, diagnostic: &Diagnostic) {
        self.emit(&self.diagnostic_lines(diagnostic));
    }

    fn report_line(&self, tone: Tone, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_WIDTH$}");
        format!("{} {message}", self.paint(tone.ansi(), &verb))
    }

    fn diagnostic_lines(&self, diagnostic: &Diagnostic) -> Vec<String> {
        let label = self.paint(
            Tone::from(diagnostic.severity).ansi(),
            &diagnostic.severity.to_string(),
        );
        let mut lines = vec![format!(
            "  {label}[{}]: {}",
            self.paint(DIM, &diagnostic.code),
            diagnostic.message
        )];
        if let Some(help) = &diagnostic.help {
            lines.push(format!("    help: {help}"));
        }
        lines
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, lines: &[String]) {
        let mut stderr = io::stderr().lock();
        for line in lines {
            // A closed stderr is not worth failing a conversion over.
            let _ = writeln!(stderr, "{line}");
        }
    }
}

/// `counted(2, "file", "files")` gives "2 files".
pub fn counted(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

/// `path` relative to the working directory when it lies beneath it.
pub fn display_path(path: &Path) -> String {
    let cwd = std::env::current_dir().ok();
    match cwd.as_deref().and_then(|cwd| path.strip_prefix(cwd).ok()) {
        Some(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Some(relative) => relative.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted() {
        assert_eq!(counted(1, "comment", "comments"), "1 comment");
        assert_eq!(counted(0, "error", "errors"), "0 errors");
    }

    #[test]
    fn test_report_line_alignment() {
        let printer = Printer::plain();
        assert_eq!(
            printer.report_line(Tone::Progress, "Parsing", "review.md"),
            "     Parsing review.md"
        );
    }

    #[test]
    fn test_colored_report_line() {
        let printer = Printer { color: true };
        let line = printer.report_line(Tone::Failure, "Failed", "1 error");
        assert!(line.starts_with("\x1b[1;31m"));
        assert!(line.ends_with("\x1b[0m 1 error"));
    }

    #[test]
    fn test_diagnostic_lines() {
        let printer = Printer::plain();
        let diagnostic = Diagnostic::warning("mdrf::validate::timestamp", "bad time")
            .with_help("Use ISO 8601");

        assert_eq!(
            printer.diagnostic_lines(&diagnostic),
            vec![
                "  warning[mdrf::validate::timestamp]: bad time".to_string(),
                "    help: Use ISO 8601".to_string(),
            ]
        );
    }

    #[test]
    fn test_display_path() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(display_path(&cwd.join("review.md")), "review.md");
        assert_eq!(display_path(&cwd), ".");
        assert_eq!(
            display_path(Path::new("/nonexistent/review.md")),
            "/nonexistent/review.md"
        );
    }
}
