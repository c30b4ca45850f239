use thiserror::Error;

use super::FieldPath;

/// Errors that abort a walk.
///
/// Unresolved schemas and unrecognised directives are not errors; they are
/// absorbed where they occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// The destination tree cannot be built at the given location.
    #[error("cannot build destination at '{path}': {details}")]
    Structural {
        /// Dotted path of the node being reconstructed.
        path: String,
        /// What was inconsistent.
        details: String,
    },
}

impl WalkError {
    /// Creates a structural error at the given path.
    pub fn structural(path: &FieldPath, details: impl Into<String>) -> Self {
        WalkError::Structural {
            path: path.to_string(),
            details: details.into(),
        }
    }
}
