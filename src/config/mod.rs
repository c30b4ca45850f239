//! Optional `valuedoc.toml` settings.

#[cfg(test)]
mod tests;

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result, ValuedocError,
    walk::{DEFAULT_MERGE_KEYS, WalkOptions},
};

/// Default file name looked up when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "valuedoc.toml";

/// Defaults never picked as the values example.
pub const DEFAULT_VALUES_EXAMPLE_SKIP: &[&str] =
    &["", "\"\"", "{}", "[]", "true", "false", "not-ca-cert"];

/// Main configuration structure for valuedoc.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuedocConfig {
    /// Traversal settings.
    pub walker: WalkerConfig,

    /// Markdown table settings.
    pub table: TableConfig,

    /// Values example selection.
    pub values_example: ValuesExampleConfig,
}

/// Traversal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Visit keys and honor the `ignore` and `break` directives.
    pub visit_keys_as_scalars: bool,

    /// Merge list elements that share an identifying field.
    pub infer_associative_lists: bool,

    /// Identifying fields for associative lists, tried in order.
    pub merge_keys: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            visit_keys_as_scalars: true,
            infer_associative_lists: false,
            merge_keys: DEFAULT_MERGE_KEYS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl WalkerConfig {
    /// Converts the settings into walker options.
    pub fn options(&self) -> WalkOptions {
        WalkOptions {
            visit_keys_as_scalars: self.visit_keys_as_scalars,
            infer_associative_lists: self.infer_associative_lists,
            merge_keys: self.merge_keys.clone(),
        }
    }
}

/// Markdown table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Header of the path column.
    pub parameter_header: String,

    /// Header of the description column.
    pub description_header: String,

    /// Header of the default column.
    pub default_header: String,

    /// Wrap defaults in backticks.
    pub code_defaults: bool,

    /// Pad cells so the columns line up in the source.
    pub align_columns: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            parameter_header: "Parameter".to_string(),
            description_header: "Description".to_string(),
            default_header: "Default".to_string(),
            code_defaults: true,
            align_columns: true,
        }
    }
}

/// Values example selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuesExampleConfig {
    /// Defaults that are too trivial to serve as an example.
    pub skip: Vec<String>,
}

impl Default for ValuesExampleConfig {
    fn default() -> Self {
        Self {
            skip: DEFAULT_VALUES_EXAMPLE_SKIP
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl ValuedocConfig {
    /// Loads the configuration from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ValuedocError::IoError` if the file exists but cannot be read
    /// and `ValuedocError::TomlParseError` if it is not valid.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ValuedocError::io(e, path))?;
        Self::from_toml(&content, Some(path))
    }

    /// Parses the configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ValuedocError::TomlParseError` if the text is not valid.
    pub fn from_toml(content: &str, path: Option<&Path>) -> Result<Self> {
        toml::from_str(content).map_err(|e| ValuedocError::toml_parse(e, path))
    }
}
