//! Line normalization and the line cursor used while parsing.

use crate::error::{MdrfError, Result};

/// Split source text into lines.
///
/// `\r\n` and lone `\r` are treated as `\n`. One trailing empty line (from a
/// final newline) is dropped.
pub fn normalize_lines(source: &str) -> Result<Vec<String>> {
    let normalized = source.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();

    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return Err(MdrfError::EmptyInput);
    }

    Ok(lines)
}

/// Forward-only cursor over normalized lines.
///
/// Tracks the position used to report the line number of parse errors.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    index: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, index: 0 }
    }

    /// The current line, without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.index).map(String::as_str)
    }

    pub fn advance(&mut self) {
        if self.index < self.lines.len() {
            self.index += 1;
        }
    }

    pub fn is_eof(&self) -> bool {
        self.index >= self.lines.len()
    }

    /// 1-indexed number of the current line (the last line once exhausted).
    pub fn line_number(&self) -> usize {
        (self.index + 1).min(self.lines.len().max(1))
    }

    /// Parse error at the current line.
    pub fn error(&self, message: impl Into<String>) -> MdrfError {
        error_at(self.line_number(), message, None)
    }

    /// Parse error at the current line with a hint.
    pub fn error_with_help(&self, message: impl Into<String>, help: impl Into<String>) -> MdrfError {
        error_at(self.line_number(), message, Some(help.into()))
    }
}

/// Parse error at a specific line.
pub fn error_at(line: usize, message: impl Into<String>, help: Option<String>) -> MdrfError {
    MdrfError::Parse {
        line,
        message: message.into(),
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_crlf() {
        let lines = normalize_lines("a\r\nb\r\nc").unwrap();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_normalize_lone_cr() {
        let lines = normalize_lines("a\rb\n").unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_drops_only_one_trailing_empty_line() {
        let lines = normalize_lines("a\n\n").unwrap();
        assert_eq!(lines, vec!["a", ""]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(normalize_lines(""), Err(MdrfError::EmptyInput)));
    }

    #[test]
    fn test_single_newline_is_not_empty() {
        let lines = normalize_lines("\n").unwrap();
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_cursor_line_numbers() {
        let lines = normalize_lines("one\ntwo").unwrap();
        let mut cursor = LineCursor::new(&lines);

        assert_eq!(cursor.line_number(), 1);
        assert_eq!(cursor.peek(), Some("one"));
        cursor.advance();
        assert_eq!(cursor.line_number(), 2);
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
        // Errors at end of input point at the last line.
        assert_eq!(cursor.line_number(), 2);
        assert_eq!(cursor.error("x").line(), Some(2));
    }
}
