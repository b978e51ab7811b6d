//! YAML codec seam.
//!
//! The parser and generator only ever touch YAML through [`YamlCodec`], which
//! exposes exactly two operations: decode text into a value, and encode a
//! value with a given indent. [`SerdeYamlCodec`] is the default.

mod emitter;

use serde_yaml::Value;
use thiserror::Error;

/// A YAML decode or encode failure, without position context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CodecError {
    pub message: String,
}

impl CodecError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Two-operation YAML capability used by parsing and generation.
pub trait YamlCodec {
    /// Decode one YAML document. Empty input decodes to `Value::Null`.
    fn decode(&self, text: &str) -> Result<Value, CodecError>;

    /// Encode a value as YAML, nesting by `indent` spaces.
    fn encode(&self, value: &Value, indent: usize) -> Result<String, CodecError>;
}

impl<C: YamlCodec + ?Sized> YamlCodec for &C {
    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        (**self).decode(text)
    }

    fn encode(&self, value: &Value, indent: usize) -> Result<String, CodecError> {
        (**self).encode(value, indent)
    }
}

/// Codec backed by `serde_yaml` for decoding and a block emitter for encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeYamlCodec;

impl YamlCodec for SerdeYamlCodec {
    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        serde_yaml::from_str(text).map_err(|e| CodecError::new(e.to_string()))
    }

    fn encode(&self, value: &Value, indent: usize) -> Result<String, CodecError> {
        emitter::emit(value, indent)
    }
}
