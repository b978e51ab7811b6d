//! Block-style YAML emitter with a configurable indent width.
//!
//! serde_yaml always indents by two spaces, so encoding goes through this
//! emitter instead. Strings are written plain when the plain text decodes back
//! to the same string, as literal block scalars when they span several lines,
//! and double-quoted otherwise.

use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use super::CodecError;

/// Largest explicit indentation indicator YAML allows on a block scalar.
const MAX_INDENT_INDICATOR: usize = 9;

/// Width of a sequence entry marker (`- `).
const ENTRY_WIDTH: usize = 2;

/// Encode a value as a block-style YAML document ending in a newline.
pub fn emit(value: &Value, indent: usize) -> Result<String, CodecError> {
    let mut emitter = Emitter {
        indent: indent.max(1),
        out: String::new(),
    };
    emitter.document(value)?;
    Ok(emitter.out)
}

struct Emitter {
    indent: usize,
    out: String,
}

impl Emitter {
    fn document(&mut self, value: &Value) -> Result<(), CodecError> {
        match value {
            Value::Mapping(map) if !map.is_empty() => self.mapping(map, 0, false),
            Value::Sequence(seq) if !seq.is_empty() => self.sequence(seq, 0),
            Value::Tagged(tagged) => {
                self.out.push_str(&tag_text(tagged));
                self.node(&tagged.value, 0, 0)
            }
            other => {
                let text = self.inline(other)?;
                self.out.push_str(&text);
                self.out.push('\n');
                Ok(())
            }
        }
    }

    /// Write mapping entries at `col`. With `inline_first`, the first key
    /// continues the current line (a `- ` entry marker was just written).
    fn mapping(&mut self, map: &Mapping, col: usize, inline_first: bool) -> Result<(), CodecError> {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 || !inline_first {
                self.pad(col);
            }
            let key = self.key(key)?;
            self.out.push_str(&key);
            self.out.push(':');
            self.node(value, col, col + self.indent)?;
        }
        Ok(())
    }

    fn sequence(&mut self, seq: &[Value], col: usize) -> Result<(), CodecError> {
        for item in seq {
            self.pad(col);
            self.out.push('-');
            match item {
                Value::Mapping(map) if !map.is_empty() => {
                    self.out.push(' ');
                    self.mapping(map, col + ENTRY_WIDTH, true)?;
                }
                other => self.node(other, col, col + ENTRY_WIDTH)?,
            }
        }
        Ok(())
    }

    /// Write the node following a `key:` or `-` indicator.
    ///
    /// `parent` is the column of the owning key or entry marker, `child` the
    /// column nested content starts at.
    fn node(&mut self, value: &Value, parent: usize, child: usize) -> Result<(), CodecError> {
        match value {
            Value::Mapping(map) if !map.is_empty() => {
                self.out.push('\n');
                self.mapping(map, child, false)
            }
            Value::Sequence(seq) if !seq.is_empty() => {
                self.out.push('\n');
                self.sequence(seq, child)
            }
            Value::Tagged(tagged) => {
                self.out.push(' ');
                self.out.push_str(&tag_text(tagged));
                self.node(&tagged.value, parent, child)
            }
            Value::String(s) if literal_eligible(s, child - parent) => {
                self.literal(s, parent, child);
                Ok(())
            }
            other => {
                let text = self.inline(other)?;
                self.out.push(' ');
                self.out.push_str(&text);
                self.out.push('\n');
                Ok(())
            }
        }
    }

    fn literal(&mut self, s: &str, parent: usize, child: usize) {
        let trailing = s.len() - s.trim_end_matches('\n').len();
        let chomp = match trailing {
            0 => "-",
            1 => "",
            _ => "+",
        };
        let body = if trailing > 0 { &s[..s.len() - 1] } else { s };

        self.out.push_str(" |");
        if needs_indent_indicator(s) {
            self.out.push_str(&(child - parent).to_string());
        }
        self.out.push_str(chomp);
        self.out.push('\n');

        for line in body.split('\n') {
            if !line.is_empty() {
                self.pad(child);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    fn key(&self, key: &Value) -> Result<String, CodecError> {
        match key {
            Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => Err(CodecError::new(
                "mapping keys must be scalars to be encoded in block style",
            )),
            other => self.inline(other),
        }
    }

    /// Single-line rendering of a scalar or empty collection.
    fn inline(&self, value: &Value) -> Result<String, CodecError> {
        Ok(match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => string_scalar(s),
            Value::Mapping(map) if map.is_empty() => "{}".to_string(),
            Value::Sequence(seq) if seq.is_empty() => "[]".to_string(),
            Value::Tagged(tagged) => format!("{} {}", tag_text(tagged), self.inline(&tagged.value)?),
            Value::Mapping(_) | Value::Sequence(_) => {
                return Err(CodecError::new("nested collection cannot be written inline"))
            }
        })
    }

    fn pad(&mut self, col: usize) {
        self.out.extend(std::iter::repeat(' ').take(col));
    }
}

fn tag_text(tagged: &TaggedValue) -> String {
    tagged.tag.to_string()
}

/// Plain if it reads back unchanged, otherwise double-quoted.
fn string_scalar(s: &str) -> String {
    if is_plain_safe(s) {
        s.to_string()
    } else {
        double_quoted(s)
    }
}

fn is_plain_safe(s: &str) -> bool {
    if s.is_empty() || s.trim() != s || s.chars().any(needs_escape) {
        return false;
    }
    matches!(serde_yaml::from_str::<Value>(s), Ok(Value::String(ref decoded)) if decoded == s)
}

fn literal_eligible(s: &str, indicator: usize) -> bool {
    if !s.contains('\n') || s.trim_matches('\n').is_empty() {
        return false;
    }
    if s.chars().any(|c| c != '\n' && c != '\t' && needs_escape(c)) {
        return false;
    }
    !needs_indent_indicator(s) || (1..=MAX_INDENT_INDICATOR).contains(&indicator)
}

/// Indentation auto-detection fails when the first non-empty line starts
/// with a space.
fn needs_indent_indicator(s: &str) -> bool {
    s.split('\n')
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with(' '))
}

fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{feff}' | '\u{2028}' | '\u{2029}')
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_emit_nested_mapping_default_indent() {
        let value = decode("a:\n  b: 1\n  c: text\n");
        assert_eq!(emit(&value, 2).unwrap(), "a:\n  b: 1\n  c: text\n");
    }

    #[test]
    fn test_emit_nested_mapping_wide_indent() {
        let value = decode("a:\n  b:\n    c: true\n");
        assert_eq!(emit(&value, 4).unwrap(), "a:\n    b:\n        c: true\n");
    }

    #[test]
    fn test_emit_sequence_of_mappings() {
        let value = decode("items:\n  - name: x\n    size: 2\n  - plain\n");
        assert_eq!(
            emit(&value, 2).unwrap(),
            "items:\n  - name: x\n    size: 2\n  - plain\n"
        );
    }

    #[test]
    fn test_emit_quotes_ambiguous_strings() {
        let mut map = Mapping::new();
        map.insert(Value::from("version"), Value::from("3.0"));
        map.insert(Value::from("flag"), Value::from("true"));
        map.insert(Value::from("note"), Value::from("a: b"));
        map.insert(Value::from("empty"), Value::from(""));

        assert_eq!(
            emit(&Value::Mapping(map), 2).unwrap(),
            "version: \"3.0\"\nflag: \"true\"\nnote: \"a: b\"\nempty: \"\"\n"
        );
    }

    #[test]
    fn test_emit_multiline_as_literal() {
        let mut map = Mapping::new();
        map.insert(Value::from("body"), Value::from("line one\nline two"));

        assert_eq!(
            emit(&Value::Mapping(map), 2).unwrap(),
            "body: |-\n  line one\n  line two\n"
        );
    }

    #[test]
    fn test_emit_literal_with_leading_space_uses_indicator() {
        let mut map = Mapping::new();
        map.insert(Value::from("diff"), Value::from(" context\n+added\n"));

        let text = emit(&Value::Mapping(map.clone()), 3).unwrap();
        assert_eq!(text, "diff: |3\n    context\n   +added\n");
        assert_eq!(decode(&text), Value::Mapping(map));
    }

    #[test]
    fn test_emit_empty_collections_and_null() {
        let value = decode("a: {}\nb: []\nc: null\n");
        assert_eq!(emit(&value, 2).unwrap(), "a: {}\nb: []\nc: null\n");
    }

    #[test]
    fn test_emit_escapes_control_characters() {
        let mut map = Mapping::new();
        map.insert(Value::from("raw"), Value::from("a\rb"));

        let text = emit(&Value::Mapping(map.clone()), 2).unwrap();
        assert_eq!(text, "raw: \"a\\rb\"\n");
        assert_eq!(decode(&text), Value::Mapping(map));
    }

    #[test]
    fn test_emit_rejects_collection_keys() {
        let mut inner = Mapping::new();
        inner.insert(Value::from("k"), Value::from("v"));
        let mut map = Mapping::new();
        map.insert(Value::Mapping(inner), Value::from("x"));

        assert!(emit(&Value::Mapping(map), 2).is_err());
    }

    #[test]
    fn test_emit_zero_indent_still_nests() {
        let value = decode("a:\n  b: 1\n");
        assert_eq!(emit(&value, 0).unwrap(), "a:\n b: 1\n");
    }

    #[test]
    fn test_emitted_text_decodes_to_same_value() {
        let source = "title: Review\nlist:\n  - 1\n  - two: 2\n    three:\n      - x\nnested:\n  deep:\n    text: |\n      keep\n      newline\n";
        let value = decode(source);

        for indent in [1, 2, 4, 8] {
            let text = emit(&value, indent).unwrap();
            assert_eq!(decode(&text), value, "indent {indent}:\n{text}");
        }
    }
}
