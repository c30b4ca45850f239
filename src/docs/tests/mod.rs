//! Unit tests for docs module
//!
//! Row extraction, table rendering and template substitution. All in-memory.

#![allow(clippy::panic)]

use serde_json::json;

use crate::ValuedocError;
use crate::config::{DEFAULT_VALUES_EXAMPLE_SKIP, TableConfig};
use crate::docs::{
    BUILTIN_README_TEMPLATE, DocInfo, Row, generate_values_table, generate_values_table_markdown,
    render_template, values_example,
};
use crate::node::parse;
use crate::schema::TypeRegistry;

fn row(path: &str, description: &str, default: &str) -> Row {
    Row {
        path: path.to_string(),
        description: description.to_string(),
        default: default.to_string(),
    }
}

fn rows_of(source: &str) -> Vec<Row> {
    generate_values_table(&parse(source).unwrap(), None).unwrap()
}

#[test]
fn extracts_rows_with_directives() {
    let rows = rows_of(
        r#"
replicas: 3   # number of pod replicas
image:
  repo: nginx # +doc-gen:break
  tag: "1.21"
debug: false  # +doc-gen:ignore
"#,
    );

    assert_eq!(
        rows,
        vec![
            row("replicas", "number of pod replicas", "3"),
            row("image.repo", "", "nginx"),
            row("image.tag", "", "\"1.21\""),
        ]
    );
}

#[test]
fn description_prefers_head_then_line_then_schema() {
    let rows = rows_of(
        r#"
# From the head
# continued
a: 1 # from the line
b: 2 # from the line
c: 3 # {"description": "from the schema"}
d: 4
"#,
    );

    let descriptions: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["From the head continued", "from the line", "from the schema", ""]
    );
}

#[test]
fn break_on_a_map_emits_single_row_with_flow_default() {
    let rows = rows_of(
        r#"
# Resource limits
resources: # +doc-gen:break
  limits:
    cpu: 100m
    memory: 128Mi
"#,
    );

    assert_eq!(
        rows,
        vec![row(
            "resources",
            "Resource limits",
            "{limits: {cpu: 100m, memory: 128Mi}}"
        )]
    );
}

#[test]
fn empty_values_use_example_block_as_default() {
    let rows = rows_of(
        r#"
# Extra annotations for the pod
# Example:
#   team: platform
#   tier: backend
podAnnotations: {}
nodeSelector:
"#,
    );

    assert_eq!(rows[0].description, "Extra annotations for the pod");
    assert_eq!(rows[0].default, "   team: platform\n   tier: backend");
    assert_eq!(rows[1], row("nodeSelector", "", ""));
}

#[test]
fn empty_containers_are_leaves() {
    let rows = rows_of("tolerations: []\naffinity: {}\n");

    assert_eq!(
        rows,
        vec![row("tolerations", "", "[]"), row("affinity", "", "{}")]
    );
}

#[test]
fn sequence_elements_are_walked_positionally() {
    let rows = rows_of("ports:\n  - name: http\n    port: 80\n");

    let paths: Vec<&str> = rows.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["ports.0.name", "ports.0.port"]);
}

#[test]
fn schema_registry_supplies_descriptions() {
    let registry = TypeRegistry::from_document(&json!({
        "definitions": {
            "Resources": {
                "type": "object",
                "properties": {
                    "cpu": { "type": "string", "description": "CPU request" },
                    "memory": { "type": "string" }
                }
            }
        }
    }));
    let root = parse(
        "resources: # {\"$ref\": \"#/definitions/Resources\"}\n  cpu: 100m\n  memory: 1Gi # Memory request\n",
    )
    .unwrap();

    let rows = generate_values_table(&root, Some(&registry)).unwrap();

    assert_eq!(
        rows,
        vec![
            row("resources.cpu", "CPU request", "100m"),
            row("resources.memory", "Memory request", "1Gi"),
        ]
    );
}

#[test]
fn markdown_table_escapes_cells() {
    let rows = vec![row("a", "one | two\nthree", "x|y")];

    let table = generate_values_table_markdown(&rows, &TableConfig::default());

    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[2].contains(r"one \| two<br>three"), "{}", lines[2]);
    assert!(lines[2].contains(r"`x\|y`"), "{}", lines[2]);
}

#[test]
fn markdown_table_without_rows_is_header_only() {
    let table = generate_values_table_markdown(&[], &TableConfig::default());

    assert_eq!(
        table,
        "| Parameter | Description | Default |\n|-----------|-------------|---------|\n"
    );
}

#[test]
fn markdown_table_honors_config() {
    let config = TableConfig {
        default_header: "Value".to_string(),
        code_defaults: false,
        align_columns: false,
        ..TableConfig::default()
    };

    let table = generate_values_table_markdown(&[row("a", "b", "c")], &config);

    assert_eq!(
        table,
        "| Parameter | Description | Value |\n|-----|-----|-----|\n| a   | b   | c   |\n"
    );
}

#[test]
fn values_example_skips_trivial_defaults() {
    let rows = vec![
        row("enabled", "", "true"),
        row("labels", "", "{}"),
        row("name", "", "\"\""),
        row("replicas", "", "3"),
        row("image", "", "nginx"),
    ];

    assert_eq!(
        values_example(&rows, DEFAULT_VALUES_EXAMPLE_SKIP).as_deref(),
        Some("replicas=3")
    );
    assert_eq!(values_example(&rows[..3], DEFAULT_VALUES_EXAMPLE_SKIP), None);
}

#[test]
fn doc_info_parses_yaml_and_json() {
    let yaml = DocInfo::parse(
        "project:\n  name: Demo\n  shortName: demo\nprerequisites:\n  - Kubernetes 1.20+\n",
        "doc.yaml",
    )
    .unwrap();
    assert_eq!(yaml.project.short_name, "demo");
    assert_eq!(yaml.prerequisites, vec!["Kubernetes 1.20+"]);

    let json = DocInfo::parse(r#"{"chart": {"name": "demo", "version": "v1"}}"#, "doc.json")
        .unwrap();
    assert_eq!(json.chart.version, "v1");

    assert_eq!(DocInfo::parse("", "doc.yaml").unwrap(), DocInfo::default());
}

#[test]
fn doc_info_rejects_wrong_shapes() {
    let error = DocInfo::parse("project: [1, 2]\n", "doc.yaml").unwrap_err();

    match error {
        ValuedocError::DocInfoError { location, .. } => assert_eq!(location, "doc.yaml"),
        other => panic!("expected DocInfoError, got {other:?}"),
    }
}

#[test]
fn template_substitutes_fields_and_lists() {
    let mut info = DocInfo::default();
    info.project.name = "Demo".to_string();
    info.chart.values_example = "replicas=3".to_string();
    info.prerequisites = vec!["- one".to_string(), "- two".to_string()];

    let rendered = render_template(
        "# {{ project.name }}\n{{#each prerequisites}}{{this}};{{/each}}\n--set {{ chart.valuesExample }}\n{{ prerequisites.[1] }}",
        &info,
        "string",
    )
    .unwrap();

    assert_eq!(rendered, "# Demo\n- one;- two;\n--set replicas=3\n- two");
}

#[test]
fn template_output_is_not_html_escaped() {
    let mut info = DocInfo::default();
    info.chart.values = "| `a` | \"<br>\" & b |".to_string();

    let rendered = render_template("{{ chart.values }}", &info, "string").unwrap();

    assert_eq!(rendered, info.chart.values);
}

#[test]
fn template_conditionals_see_empty_sections() {
    let mut info = DocInfo::default();
    info.project.name = "Demo".to_string();

    let rendered = render_template(
        "{{#if prerequisites}}has{{else}}none{{/if}} {{#if project.name}}{{project.name}}{{/if}}",
        &info,
        "string",
    )
    .unwrap();

    assert_eq!(rendered, "none Demo");
}

#[test]
fn template_missing_field_is_an_error() {
    let error =
        render_template("{{ project.missing }}", &DocInfo::default(), "readme.tpl").unwrap_err();

    match error {
        ValuedocError::TemplateError { location, details } => {
            assert_eq!(location, "readme.tpl");
            assert!(details.contains("missing"), "{details}");
        }
        other => panic!("expected TemplateError, got {other:?}"),
    }
}

#[test]
fn malformed_template_is_an_error() {
    let error = render_template("{{#each prerequisites}}", &DocInfo::default(), "string")
        .unwrap_err();

    assert!(matches!(error, ValuedocError::TemplateError { .. }));
}

#[test]
fn builtin_template_renders_with_defaults() {
    let rendered =
        render_template(BUILTIN_README_TEMPLATE, &DocInfo::default(), "builtin").unwrap();

    assert!(rendered.contains("## Configuration"));
    assert!(!rendered.contains("{{"));
}
