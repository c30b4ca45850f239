use crate::config::TableConfig;

use super::Row;

/// Renders rows as a three-column Markdown table.
///
/// An empty row list yields the header and separator only.
///
/// # Example
///
/// ```
/// use valuedoc::config::TableConfig;
/// use valuedoc::docs::{Row, generate_values_table_markdown};
///
/// let rows = vec![Row {
///     path: "replicas".to_string(),
///     description: "Pod count".to_string(),
///     default: "3".to_string(),
/// }];
/// let table = generate_values_table_markdown(&rows, &TableConfig::default());
/// assert_eq!(
///     table,
///     "| Parameter | Description | Default |\n\
///      |-----------|-------------|---------|\n\
///      | replicas  | Pod count   | `3`     |\n"
/// );
/// ```
pub fn generate_values_table_markdown(rows: &[Row], config: &TableConfig) -> String {
    let header = [
        escape_cell(&config.parameter_header),
        escape_cell(&config.description_header),
        escape_cell(&config.default_header),
    ];

    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| {
            let default = if config.code_defaults {
                format!("`{}`", row.default)
            } else {
                row.default.clone()
            };
            [
                escape_cell(&row.path),
                escape_cell(&row.description),
                escape_cell(&default),
            ]
        })
        .collect();

    let widths: [usize; 3] = if config.align_columns {
        std::array::from_fn(|column| {
            cells
                .iter()
                .map(|row| row[column].chars().count())
                .chain(std::iter::once(header[column].chars().count()))
                .max()
                .unwrap_or_default()
                .max(3)
        })
    } else {
        [3; 3]
    };

    let mut table = String::new();
    table.push_str(&format_line(&header, &widths));
    table.push_str(&separator_line(&widths));
    for row in &cells {
        table.push_str(&format_line(row, &widths));
    }
    table
}

fn format_line(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let padded = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("| {padded} |\n")
}

fn separator_line(widths: &[usize; 3]) -> String {
    let dashes = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("|");
    format!("|{dashes}|\n")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
