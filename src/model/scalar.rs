//! Lenient deserializers for identifier-like text fields and numbering.
//!
//! Hand-written YAML often leaves ids unquoted (`id: 1.1`, `name_id: 42`),
//! which YAML resolves to numbers. These fields are text in the model, so any
//! scalar is accepted and stored in its textual form.
//!
//! Thread and line numbers go the other way: anything that is not a positive
//! integer (`-1`, `2.5`, `abc`) decodes as "unset". Whether unset is acceptable
//! is a validation question, not a decoding one.

use serde::de::{self, Deserialize, Deserializer};
use serde_yaml::Value;

/// Textual form of a YAML scalar. `None` for null and collections.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a text value, found {}", kind(&value))))
}

pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(&value).map(Some).ok_or_else(|| {
            de::Error::custom(format!("expected a text value, found {}", kind(&value)))
        }),
    }
}

/// Positive integer value of a scalar, or `None` when it has none.
fn positive_number(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::Tagged(tagged) => return positive_number(&tagged.value),
        _ => None,
    };
    number.filter(|n| *n >= 1)
}

/// Thread number where 0 stands for "unset".
pub fn number_or_unset<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(positive_number(&value).unwrap_or(0))
}

pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(positive_number))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
