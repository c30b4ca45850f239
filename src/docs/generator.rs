use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{Result, ValuedocError, config::ValuedocConfig, node, schema::TypeRegistry};

use super::{
    BUILTIN_README_TEMPLATE, DocInfo, Row, generate_values_table_markdown,
    generate_values_table_with, render_template, values_example,
};

/// What the generator writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The README template with the values table filled in.
    #[default]
    Readme,
    /// The Markdown values table alone.
    Table,
    /// The rows as a JSON array.
    Json,
}

/// Generates documentation for a chart's values file.
///
/// Reads the values document, the optional schema registry, the project info
/// file and the README template, then writes the selected output to a file or
/// stdout.
#[derive(Debug, Clone)]
pub struct DocsGenerator {
    doc_file: PathBuf,
    values_file: PathBuf,
    template_file: PathBuf,
    schema_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    format: OutputFormat,
    config: ValuedocConfig,
}

impl Default for DocsGenerator {
    fn default() -> Self {
        Self {
            doc_file: PathBuf::from("doc.yaml"),
            values_file: PathBuf::from("values.yaml"),
            template_file: PathBuf::from("readme.tpl"),
            schema_file: None,
            output_file: None,
            format: OutputFormat::default(),
            config: ValuedocConfig::default(),
        }
    }
}

impl DocsGenerator {
    /// Creates a generator with the default file names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project info file.
    pub fn with_doc_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.doc_file = path.into();
        self
    }

    /// Sets the values file to document.
    pub fn with_values_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.values_file = path.into();
        self
    }

    /// Sets the README template; the built-in one is used if it is missing.
    pub fn with_template_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_file = path.into();
        self
    }

    /// Sets a JSON Schema file to resolve `$ref` markers against.
    pub fn with_schema_file(mut self, path: Option<PathBuf>) -> Self {
        self.schema_file = path;
        self
    }

    /// Writes to a file instead of stdout.
    pub fn with_output_file(mut self, path: Option<PathBuf>) -> Self {
        self.output_file = path;
        self
    }

    /// Selects the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Applies settings loaded from `valuedoc.toml`.
    pub fn with_config(mut self, config: ValuedocConfig) -> Self {
        self.config = config;
        self
    }

    /// Extracts the rows of the values file.
    ///
    /// # Errors
    ///
    /// Returns an error if the values or schema file cannot be read or parsed,
    /// or if the walk aborts.
    #[instrument(skip(self), fields(values = %self.values_file.display()))]
    pub fn rows(&self) -> Result<Vec<Row>> {
        let content = read_file(&self.values_file)?;
        let root = node::parse(&content)
            .map_err(|e| ValuedocError::values_parse(e, Some(&self.values_file)))?;

        let registry = self
            .schema_file
            .as_deref()
            .map(TypeRegistry::load)
            .transpose()?;
        if let Some(registry) = &registry {
            debug!(definitions = registry.len(), "loaded schema registry");
        }

        let rows =
            generate_values_table_with(&root, registry.as_ref(), self.config.walker.options())?;
        info!(rows = rows.len(), "extracted values table");
        Ok(rows)
    }

    /// Renders the selected output.
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be read or parsed, or if the
    /// template references a missing field.
    pub fn render(&self) -> Result<String> {
        let rows = self.rows()?;
        let table = generate_values_table_markdown(&rows, &self.config.table);

        match self.format {
            OutputFormat::Table => Ok(table),
            OutputFormat::Json => serde_json::to_string_pretty(&rows).map_err(|e| {
                ValuedocError::SerializeError {
                    details: e.to_string(),
                }
            }),
            OutputFormat::Readme => {
                let mut info = DocInfo::load(&self.doc_file)?;
                info.chart.values = table;
                info.chart.values_example =
                    values_example(&rows, &self.config.values_example.skip).unwrap_or_default();

                let (template, location) = self.load_template()?;
                render_template(&template, &info, &location)
            }
        }
    }

    /// Renders the selected output and writes it.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the output cannot be written.
    pub fn generate(&self) -> Result<()> {
        let content = self.render()?;

        match &self.output_file {
            Some(path) => {
                fs::write(path, content).map_err(|e| ValuedocError::io(e, path))?;
                info!(output = %path.display(), "wrote documentation");
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }

    /// Returns the template text and where it came from.
    fn load_template(&self) -> Result<(String, String)> {
        match fs::read_to_string(&self.template_file) {
            Ok(template) => Ok((template, self.template_file.display().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    template = %self.template_file.display(),
                    "template not found, using built-in README template"
                );
                Ok((BUILTIN_README_TEMPLATE.to_string(), "builtin".to_string()))
            }
            Err(e) => Err(ValuedocError::io(e, &self.template_file)),
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ValuedocError::io(e, path))
}
