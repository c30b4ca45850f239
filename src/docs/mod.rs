//! Documentation generation for annotated values files.
//!
//! Extracts one row per documented field, renders the rows as a Markdown
//! table and substitutes the table into a README template.

mod generator;
mod markdown;
mod rows;
mod template;

#[cfg(test)]
mod tests;

pub use generator::{DocsGenerator, OutputFormat};
pub use markdown::generate_values_table_markdown;
pub use rows::{Row, RowExtractor, generate_values_table, generate_values_table_with};
pub use template::{
    BUILTIN_README_TEMPLATE, ChartInfo, DocInfo, ProjectInfo, ReleaseInfo, RepositoryInfo,
    render_template, values_example,
};
