//! Conversion options and the `mdrf.yaml` config file.
//!
//! Options only affect the object → text direction (and the indent of YAML
//! produced by `parse_to_yaml`); parsing MDRF text never depends on them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MdrfError, Result};

/// Config file looked up in the working directory by the CLI.
pub const CONFIG_FILENAME: &str = "mdrf.yaml";

/// Generation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Spaces per nesting level in emitted YAML.
    pub yaml_indent: usize,

    /// Replace stored thread numbers and comment ids with sequential ones.
    pub auto_numbering: bool,
}

fn default_yaml_indent() -> usize {
    2
}

impl Default for Options {
    fn default() -> Self {
        Self {
            yaml_indent: default_yaml_indent(),
            auto_numbering: false,
        }
    }
}

impl Options {
    /// Load options from a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MdrfError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse options from a YAML string. Missing keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| MdrfError::Decode {
            message: format!("Invalid config: {}", e),
        })
    }

    pub fn with_yaml_indent(mut self, yaml_indent: usize) -> Self {
        self.yaml_indent = yaml_indent;
        self
    }

    pub fn with_auto_numbering(mut self, auto_numbering: bool) -> Self {
        self.auto_numbering = auto_numbering;
        self
    }
}
