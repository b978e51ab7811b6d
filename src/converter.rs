//! Conversion entry points.
//!
//! [`Converter`] bundles a YAML codec with generation options and exposes the
//! four conversions between MDRF text, the object model and object YAML.

use serde_yaml::Value;

use crate::error::{MdrfError, Result};
use crate::generator::generate_document;
use crate::model::Document;
use crate::options::Options;
use crate::parser::parse_document;
use crate::validation::{validate_document, ValidationResult};
use crate::yaml::{SerdeYamlCodec, YamlCodec};

/// Converts between MDRF text and [`Document`]s.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads whenever its codec can.
#[derive(Debug, Clone, Default)]
pub struct Converter<C: YamlCodec = SerdeYamlCodec> {
    codec: C,
    options: Options,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: YamlCodec> Converter<C> {
    /// Build a converter around a custom codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse MDRF text into a document.
    pub fn parse_to_object(&self, text: &str) -> Result<Document> {
        parse_document(text, &self.codec)
    }

    /// Parse MDRF text and encode the document as YAML.
    pub fn parse_to_yaml(&self, text: &str) -> Result<String> {
        self.to_yaml(&self.parse_to_object(text)?)
    }

    /// Parse MDRF text and render the document as pretty-printed JSON.
    pub fn parse_to_json(&self, text: &str) -> Result<String> {
        self.to_json(&self.parse_to_object(text)?)
    }

    /// Encode an already-parsed document as object YAML.
    pub fn to_yaml(&self, doc: &Document) -> Result<String> {
        let value = serde_yaml::to_value(doc).map_err(|e| MdrfError::Encode {
            message: e.to_string(),
        })?;

        self.codec
            .encode(&value, self.options.yaml_indent)
            .map_err(|e| MdrfError::Encode { message: e.message })
    }

    pub fn to_json(&self, doc: &Document) -> Result<String> {
        serde_json::to_string_pretty(doc).map_err(|e| MdrfError::Encode {
            message: e.to_string(),
        })
    }

    /// Generate MDRF text using this converter's options.
    pub fn generate_from_object(&self, doc: &Document) -> Result<String> {
        self.generate_from_object_with(doc, &self.options)
    }

    /// Generate MDRF text with per-call options.
    pub fn generate_from_object_with(&self, doc: &Document, options: &Options) -> Result<String> {
        generate_document(doc, options, &self.codec)
    }

    /// Decode object YAML and generate MDRF text from it.
    pub fn generate_from_yaml(&self, text: &str) -> Result<String> {
        self.generate_from_yaml_with(text, &self.options)
    }

    /// Decode object YAML and generate MDRF text with per-call options.
    pub fn generate_from_yaml_with(&self, text: &str, options: &Options) -> Result<String> {
        let doc = self.decode_document(text)?;
        self.generate_from_object_with(&doc, options)
    }

    /// Run generation's pre-validation without producing text.
    pub fn validate(&self, doc: &Document) -> ValidationResult {
        validate_document(doc, &self.options)
    }

    fn decode_document(&self, text: &str) -> Result<Document> {
        let value = self.codec.decode(text).map_err(|e| MdrfError::Decode {
            message: e.message,
        })?;

        if !matches!(value, Value::Mapping(_)) {
            return Err(MdrfError::Validation {
                message: "YAML content does not describe a document object".to_string(),
                help: Some("Expected a mapping with title, front_matter and groups".to_string()),
            });
        }

        serde_yaml::from_value(value).map_err(|e| MdrfError::Validation {
            message: format!("Invalid document structure: {}", e),
            help: None,
        })
    }
}
