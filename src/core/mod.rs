use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{node::ParseError, walk::WalkError};

/// Error types for the valuedoc crate.
///
/// Wraps document, walk, configuration and rendering failures with the
/// location they happened at.
#[derive(Error, Debug)]
pub enum ValuedocError {
    /// Values document is not valid YAML
    #[error("failed to parse values document '{location}': {source}")]
    ValuesParseError {
        /// File path, or "string" for in-memory input
        location: String,
        /// Underlying parse error with its line number
        #[source]
        source: ParseError,
    },

    /// Walk aborted
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Project info file is malformed
    #[error("failed to load doc info at '{location}': {details}")]
    DocInfoError {
        /// Location of the doc info being parsed
        location: String,
        /// Parse error details
        details: String,
    },

    /// Type registry document is malformed
    #[error("failed to load schema registry at '{location}': {details}")]
    RegistryError {
        /// Location of the registry document
        location: String,
        /// Parse error details
        details: String,
    },

    /// README template could not be rendered
    #[error("failed to render template '{location}': {details}")]
    TemplateError {
        /// Template file path, or "builtin" for the bundled template
        location: String,
        /// Renderer error details
        details: String,
    },

    /// Rows could not be serialized
    #[error("failed to serialize output: {details}")]
    SerializeError {
        /// Serializer error details
        details: String,
    },
}

/// A specialized `Result` type for valuedoc operations.
pub type Result<T> = std::result::Result<T, ValuedocError>;

impl ValuedocError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        ValuedocError::TomlParseError {
            location: location(path),
            details: error.to_string(),
        }
    }

    /// Creates a values parsing error with optional file path context.
    pub fn values_parse(error: ParseError, path: Option<&Path>) -> Self {
        ValuedocError::ValuesParseError {
            location: location(path),
            source: error,
        }
    }

    /// Creates an I/O error carrying the path it happened at.
    pub fn io(error: impl std::fmt::Display, path: &Path) -> Self {
        ValuedocError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}

fn location(path: Option<&Path>) -> String {
    match path {
        Some(p) => {
            let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
            clean_path.to_string_lossy().to_string()
        }
        None => "string".to_string(),
    }
}
