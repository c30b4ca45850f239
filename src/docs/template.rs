use std::{fs, path::Path};

use handlebars::{Handlebars, no_escape};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, ValuedocError};

use super::Row;

/// README template used when no template file is present.
pub const BUILTIN_README_TEMPLATE: &str = include_str!("templates/readme.tpl");

/// Project information substituted into the README template.
///
/// Loaded from a YAML or JSON file; keys are camelCase (`shortName`,
/// `valuesExample`) and every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocInfo {
    /// The project the chart belongs to.
    pub project: ProjectInfo,
    /// Chart repository.
    pub repository: RepositoryInfo,
    /// The chart itself, including the generated values table.
    pub chart: ChartInfo,
    /// Requirements listed before installation.
    pub prerequisites: Vec<String>,
    /// Release used in install commands.
    pub release: ReleaseInfo,
}

/// Project section of [`DocInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInfo {
    /// Display name.
    pub name: String,
    /// Short name used in prose.
    pub short_name: String,
    /// Project home page.
    pub url: String,
    /// One-paragraph description.
    pub description: String,
    /// What gets deployed.
    pub app: String,
}

/// Repository section of [`DocInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryInfo {
    /// Chart repository URL.
    pub url: String,
    /// Name the repository is added under.
    pub name: String,
}

/// Chart section of [`DocInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartInfo {
    /// Chart name.
    pub name: String,
    /// Chart version.
    pub version: String,
    /// Rendered values table; filled in by the generator.
    pub values: String,
    /// `path=default` example for `--set`; filled in by the generator.
    pub values_example: String,
}

/// Release section of [`DocInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseInfo {
    /// Release name.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
}

impl DocInfo {
    /// Loads project information from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ValuedocError::IoError` if the file cannot be read and
    /// `ValuedocError::DocInfoError` if it is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ValuedocError::io(e, path))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses project information from YAML or JSON text.
    ///
    /// Empty input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ValuedocError::DocInfoError` if the text is malformed.
    pub fn parse(content: &str, location: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| ValuedocError::DocInfoError {
            location: location.to_string(),
            details: e.to_string(),
        })
    }
}

/// Picks the first row whose default is worth showing as a `--set` example.
///
/// Returns `path=default`, or `None` when every default is in `skip`.
pub fn values_example<S: AsRef<str>>(rows: &[Row], skip: &[S]) -> Option<String> {
    rows.iter()
        .find(|row| !skip.iter().any(|trivial| trivial.as_ref() == row.default))
        .map(|row| format!("{}={}", row.path, row.default))
}

/// Renders a Handlebars template against `info`.
///
/// Fields are addressed by their camelCase names (`{{ chart.valuesExample }}`)
/// and lists are iterated with `{{#each prerequisites}}`. Output is not HTML
/// escaped, so the Markdown table is inserted verbatim.
///
/// # Errors
///
/// Returns `ValuedocError::TemplateError` if the template is malformed or
/// references a field that does not exist.
pub fn render_template(template: &str, info: &DocInfo, location: &str) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(no_escape);

    let context = serde_json::to_value(info).map_err(|e| ValuedocError::SerializeError {
        details: e.to_string(),
    })?;

    let rendered = handlebars
        .render_template(template, &context)
        .map_err(|e| ValuedocError::TemplateError {
            location: location.to_string(),
            details: e.to_string(),
        })?;

    debug!(template = location, bytes = rendered.len(), "rendered template");
    Ok(rendered)
}
