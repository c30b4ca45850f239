use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::{
    annotation,
    node::Node,
    schema::{ResolvedSchema, TypeRegistry},
    walk::{FieldPath, Visitor, WalkError, WalkOptions, Walker},
};

/// One documented field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Dotted path of the field from the document root.
    pub path: String,
    /// Description taken from comments or the field's schema.
    pub description: String,
    /// Default value rendered as single-line YAML.
    pub default: String,
}

/// Visitor that records a [`Row`] for every leaf field.
///
/// Containers are returned empty for the walker to fill and scalars are
/// cloned, so the destination tree mirrors the source minus ignored fields.
pub struct RowExtractor<'a> {
    rows: &'a mut Vec<Row>,
}

impl<'a> RowExtractor<'a> {
    /// Creates an extractor appending to `rows`.
    pub fn new(rows: &'a mut Vec<Row>) -> Self {
        Self { rows }
    }
}

impl Visitor for RowExtractor<'_> {
    fn visit_leaf(
        &mut self,
        key: &Node,
        value: &Node,
        path: &FieldPath,
        schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        let row = Row {
            path: path.to_string(),
            description: field_description(key, schema),
            default: field_default(key, value),
        };
        trace!(path = %row.path, default = %row.default, "row");
        self.rows.push(row);

        Ok(Some(value.clone()))
    }
}

/// Head comment, then line comment, then schema description.
fn field_description(key: &Node, schema: Option<&ResolvedSchema>) -> String {
    let comments = &key.annotations;

    [
        annotation::description(&comments.head_comment),
        annotation::description(&comments.line_comment),
    ]
    .into_iter()
    .find(|description| !description.is_empty())
    .or_else(|| schema.and_then(ResolvedSchema::description).map(str::to_string))
    .unwrap_or_default()
}

fn field_default(key: &Node, value: &Node) -> String {
    annotation::example(&key.annotations.head_comment)
        .filter(|_| value.is_empty())
        .unwrap_or_else(|| value.render_flow())
}

/// Extracts documentation rows from a values document.
///
/// Keys are visited as scalars so the `ignore` and `break` directives apply.
///
/// # Errors
///
/// Returns `WalkError` if the walk aborts; no rows are returned then.
///
/// # Example
///
/// ```
/// use valuedoc::docs::generate_values_table;
/// use valuedoc::node::parse;
///
/// let root = parse("replicas: 3 # number of pod replicas\n").unwrap();
/// let rows = generate_values_table(&root, None).unwrap();
/// assert_eq!(rows[0].path, "replicas");
/// assert_eq!(rows[0].description, "number of pod replicas");
/// assert_eq!(rows[0].default, "3");
/// ```
pub fn generate_values_table(
    root: &Node,
    registry: Option<&TypeRegistry>,
) -> Result<Vec<Row>, WalkError> {
    let options = WalkOptions {
        visit_keys_as_scalars: true,
        ..WalkOptions::default()
    };
    generate_values_table_with(root, registry, options)
}

/// Extracts documentation rows with explicit walker options.
///
/// # Errors
///
/// Returns `WalkError` if the walk aborts; no rows are returned then.
#[instrument(skip_all, fields(keys_as_scalars = options.visit_keys_as_scalars))]
pub fn generate_values_table_with(
    root: &Node,
    registry: Option<&TypeRegistry>,
    options: WalkOptions,
) -> Result<Vec<Row>, WalkError> {
    let mut rows = Vec::new();
    let mut extractor = RowExtractor::new(&mut rows);

    Walker::new(&mut extractor)
        .with_registry(registry)
        .with_options(options)
        .walk(root)?;

    Ok(rows)
}
