//! YAML front matter extraction.

use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::model::{is_supported_version, MDRF_VERSION, VERSION_KEY};
use crate::yaml::YamlCodec;

use super::lines::{error_at, LineCursor};

const DELIMITER: &str = "---";

/// Read the `---` delimited front matter block at the cursor.
///
/// Blank lines before the opening `---` are skipped; generated text puts one
/// between the title and the front matter. The block must decode to a
/// mapping carrying a supported `mdrf_version`, which is normalized to the
/// text "3.0".
pub fn read_front_matter(cursor: &mut LineCursor<'_>, codec: &dyn YamlCodec) -> Result<Mapping> {
    while cursor.peek().is_some_and(|line| line.trim().is_empty()) {
        cursor.advance();
    }
    let start_line = cursor.line_number();

    match cursor.peek() {
        None => {
            return Err(cursor.error_with_help(
                "Missing YAML front matter after the title",
                "Add ---\\nmdrf_version: 3.0\\n--- after the title line",
            ))
        }
        Some(line) if line == DELIMITER => cursor.advance(),
        Some(_) => {
            return Err(cursor.error_with_help(
                "The title must be immediately followed by YAML front matter (---)",
                "Add ---\\nmdrf_version: 3.0\\n--- after the title line",
            ))
        }
    }

    let mut yaml_lines = Vec::new();
    let mut closed = false;
    while let Some(line) = cursor.peek() {
        cursor.advance();
        if line == DELIMITER {
            closed = true;
            break;
        }
        yaml_lines.push(line);
    }

    if !closed {
        return Err(error_at(
            start_line,
            "Unclosed front matter: missing closing ---",
            Some("Add --- after the YAML content".to_string()),
        ));
    }

    // Line-terminated, so block scalars at the end keep their final newline.
    let mut text = yaml_lines.join("\n");
    text.push('\n');
    let parsed = codec.decode(&text).map_err(|e| {
        error_at(
            start_line,
            format!("Invalid YAML in front matter: {e}"),
            None,
        )
    })?;

    let mut front_matter = match parsed {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        _ => {
            return Err(error_at(
                start_line,
                "Front matter must be a YAML mapping",
                Some("Use key: value format".to_string()),
            ))
        }
    };

    if !front_matter.get(VERSION_KEY).is_some_and(is_supported_version) {
        return Err(error_at(
            start_line,
            format!("YAML front matter must contain '{VERSION_KEY}: {MDRF_VERSION}'"),
            None,
        ));
    }

    front_matter.insert(Value::from(VERSION_KEY), Value::from(MDRF_VERSION));
    Ok(front_matter)
}
