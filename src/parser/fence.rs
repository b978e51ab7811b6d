//! Fenced code block extraction.

use crate::error::Result;

use super::headings;
use super::lines::{error_at, LineCursor};

/// A fenced block read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock {
    /// Lowercased language tag (empty when untagged)
    pub lang: String,
    /// Lines between the fences, joined with `\n`, verbatim
    pub content: String,
    /// Line number of the opening fence
    pub start_line: usize,
}

/// Read a fenced block tagged `expected_lang` starting at the cursor.
///
/// The cursor must sit on the opening fence. On success it is left on the
/// line after the closing fence.
pub fn read_fenced_block(cursor: &mut LineCursor<'_>, expected_lang: &str) -> Result<FencedBlock> {
    let start_line = cursor.line_number();
    let opening = cursor.peek().ok_or_else(|| {
        cursor.error(format!(
            "Unexpected end of input, expected a ```{expected_lang} code block"
        ))
    })?;

    let lang = match headings::fence_open(opening) {
        Some(lang) => lang.to_ascii_lowercase(),
        None => {
            return Err(cursor.error_with_help(
                format!("Expected a '{expected_lang}' code block, but found \"{opening}\""),
                format!("Open the block with ```{expected_lang}"),
            ))
        }
    };

    if lang != expected_lang.to_ascii_lowercase() {
        let found = if lang.is_empty() { "unspecified" } else { lang.as_str() };
        return Err(cursor.error_with_help(
            format!("Expected a '{expected_lang}' code block, but found '{found}'"),
            format!("Tag the block as ```{expected_lang}"),
        ));
    }
    cursor.advance();

    let mut block_lines = Vec::new();
    while let Some(line) = cursor.peek() {
        cursor.advance();
        if headings::is_fence_close(line) {
            return Ok(FencedBlock {
                lang,
                content: block_lines.join("\n"),
                start_line,
            });
        }
        block_lines.push(line);
    }

    Err(error_at(
        start_line,
        format!("Fenced code block (started with {opening}) was not closed with ```"),
        Some("Add a line containing only ``` after the block content".to_string()),
    ))
}
