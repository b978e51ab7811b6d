//! Optional fenced YAML metadata blocks.
//!
//! Groups, files and threads may each be followed by a ```` ```yaml ```` block
//! holding a single top-level key. The block is only consumed when the next
//! line opens a YAML fence; anything else leaves the cursor untouched.

use serde_yaml::{Mapping, Value};

use crate::error::Result;
use crate::yaml::YamlCodec;

use super::fence::read_fenced_block;
use super::headings;
use super::lines::{error_at, LineCursor};

/// Whether the line opens a fence whose tag mentions yaml.
fn opens_yaml_block(line: &str) -> bool {
    headings::fence_open(line).is_some() && line.to_ascii_lowercase().contains("yaml")
}

/// Read an optional YAML block and return the value under `expected_key`.
///
/// Returns `Ok(None)` without consuming input when no YAML block follows.
pub fn read_optional(
    cursor: &mut LineCursor<'_>,
    codec: &dyn YamlCodec,
    expected_key: &str,
) -> Result<Option<Value>> {
    match cursor.peek() {
        Some(line) if opens_yaml_block(line) => {}
        _ => return Ok(None),
    }

    let block = read_fenced_block(cursor, "yaml")?;
    let parsed = codec.decode(&format!("{}\n", block.content)).map_err(|e| {
        error_at(
            block.start_line,
            format!("Failed to parse YAML metadata block for key '{expected_key}': {e}"),
            None,
        )
    })?;

    match parsed.get(expected_key) {
        Some(value) if parsed.is_mapping() => Ok(Some(value.clone())),
        _ => Err(error_at(
            block.start_line,
            format!("YAML block found, but missing the required top-level key '{expected_key}'"),
            Some(format!("Nest the metadata under '{expected_key}:'")),
        )),
    }
}

/// Like [`read_optional`], but the nested value must be a mapping.
///
/// `null` and empty mappings count as absent.
pub fn read_optional_mapping(
    cursor: &mut LineCursor<'_>,
    codec: &dyn YamlCodec,
    expected_key: &str,
) -> Result<Option<Mapping>> {
    let start_line = cursor.line_number();
    match read_optional(cursor, codec, expected_key)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(map)) if map.is_empty() => Ok(None),
        Some(Value::Mapping(map)) => Ok(Some(map)),
        Some(_) => Err(error_at(
            start_line,
            format!("'{expected_key}' must be a YAML mapping"),
            Some("Use key: value pairs under the metadata key".to_string()),
        )),
    }
}
