use miette::Diagnostic;
use thiserror::Error;

/// Main error type for MDRF conversions.
///
/// Parse-direction failures (`EmptyInput`, `Parse`) and generate-direction
/// failures (`Validation`, `Decode`, `Encode`) never overlap, so callers can
/// branch on [`MdrfError::category`] to tell "bad text" from "bad object".
#[derive(Error, Diagnostic, Debug)]
pub enum MdrfError {
    #[error("Parse error (line 1): input is empty")]
    #[diagnostic(code(mdrf::parse::empty), help("An MDRF document starts with '# <title>'"))]
    EmptyInput,

    #[error("Parse error (line {line}): {message}")]
    #[diagnostic(code(mdrf::parse))]
    Parse {
        line: usize,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(mdrf::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("YAML decode error: {message}")]
    #[diagnostic(code(mdrf::decode))]
    Decode { message: String },

    #[error("YAML encode error: {message}")]
    #[diagnostic(code(mdrf::encode))]
    Encode { message: String },

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(mdrf::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },
}

/// Coarse error family, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Validation,
    Decode,
    Encode,
    Io,
}

impl MdrfError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MdrfError::EmptyInput | MdrfError::Parse { .. } => ErrorCategory::Parse,
            MdrfError::Validation { .. } => ErrorCategory::Validation,
            MdrfError::Decode { .. } => ErrorCategory::Decode,
            MdrfError::Encode { .. } => ErrorCategory::Encode,
            MdrfError::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Source line (1-indexed) for parse errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            MdrfError::EmptyInput => Some(1),
            MdrfError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        MdrfError::Validation {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MdrfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_disjoint() {
        let parse = MdrfError::Parse {
            line: 3,
            message: "boom".to_string(),
            help: None,
        };
        let decode = MdrfError::Decode {
            message: "bad yaml".to_string(),
        };

        assert_eq!(parse.category(), ErrorCategory::Parse);
        assert_eq!(MdrfError::EmptyInput.category(), ErrorCategory::Parse);
        assert_eq!(MdrfError::validation("x").category(), ErrorCategory::Validation);
        assert_eq!(decode.category(), ErrorCategory::Decode);
    }

    #[test]
    fn test_line_only_for_parse_errors() {
        let parse = MdrfError::Parse {
            line: 7,
            message: "boom".to_string(),
            help: None,
        };

        assert_eq!(parse.line(), Some(7));
        assert_eq!(MdrfError::EmptyInput.line(), Some(1));
        assert_eq!(MdrfError::validation("x").line(), None);
    }

    #[test]
    fn test_parse_error_display() {
        let err = MdrfError::Parse {
            line: 12,
            message: "Found H3 without a parent H2 group".to_string(),
            help: None,
        };

        insta::assert_snapshot!(err.to_string(), @"Parse error (line 12): Found H3 without a parent H2 group");
    }
}
