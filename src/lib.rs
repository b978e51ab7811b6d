//! mdrf - Markdown Diff Review Format converter
//!
//! A library for converting code review documents between MDRF text (a
//! heading-structured markdown dialect with YAML metadata blocks) and a typed
//! object model, plus a YAML rendering of that model.
//!
//! ```
//! use mdrf::{generate_from_object, parse_to_object, Options};
//!
//! let text = "# Notes\n\n---\nmdrf_version: 3.0\n---\n\n## review: r1\n";
//! let doc = parse_to_object(text)?;
//! let regenerated = generate_from_object(&doc, &Options::default())?;
//!
//! assert_eq!(parse_to_object(&regenerated)?, doc);
//! # Ok::<(), mdrf::MdrfError>(())
//! ```

pub mod cli;
pub mod converter;
pub mod error;
pub mod generator;
pub mod model;
pub mod options;
pub mod output;
pub mod parser;
pub mod validation;
pub mod yaml;

pub use converter::Converter;
pub use error::{ErrorCategory, MdrfError, Result};
pub use model::{
    Comment, Document, FileEntry, FileStatus, Group, Thread, MDRF_VERSION, VERSION_KEY,
};
pub use options::{Options, CONFIG_FILENAME};
pub use validation::{validate_document, Diagnostic, Severity, ValidationResult};
pub use yaml::{CodecError, SerdeYamlCodec, YamlCodec};

/// Parse MDRF text into a [`Document`] with the default codec.
pub fn parse_to_object(text: &str) -> Result<Document> {
    Converter::new().parse_to_object(text)
}

/// Parse MDRF text and render the document as YAML (2-space indent).
pub fn parse_to_yaml(text: &str) -> Result<String> {
    Converter::new().parse_to_yaml(text)
}

/// Generate MDRF text from a [`Document`].
pub fn generate_from_object(doc: &Document, options: &Options) -> Result<String> {
    Converter::new().generate_from_object_with(doc, options)
}

/// Generate MDRF text from the YAML rendering of a [`Document`].
pub fn generate_from_yaml(text: &str, options: &Options) -> Result<String> {
    Converter::new().generate_from_yaml_with(text, options)
}
