//! Unit tests for config module
//!
//! Tests configuration defaults and TOML parsing.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]

use crate::ValuedocError;
use crate::config::{DEFAULT_VALUES_EXAMPLE_SKIP, ValuedocConfig};

#[test]
fn config_default() {
    let config = ValuedocConfig::default();

    assert!(config.walker.visit_keys_as_scalars);
    assert!(!config.walker.infer_associative_lists);
    assert_eq!(config.walker.merge_keys, vec!["name", "id", "key"]);
    assert_eq!(config.table.parameter_header, "Parameter");
    assert!(config.table.code_defaults);
    assert_eq!(config.values_example.skip.len(), DEFAULT_VALUES_EXAMPLE_SKIP.len());
}

#[test]
fn config_empty_toml_is_default() {
    let config = ValuedocConfig::from_toml("", None).unwrap();

    assert_eq!(config, ValuedocConfig::default());
}

#[test]
fn config_partial_sections_keep_other_defaults() {
    let config = ValuedocConfig::from_toml(
        r#"
[walker]
infer_associative_lists = true

[table]
default_header = "Default value"
"#,
        None,
    )
    .unwrap();

    assert!(config.walker.infer_associative_lists);
    assert!(config.walker.visit_keys_as_scalars);
    assert_eq!(config.table.default_header, "Default value");
    assert_eq!(config.table.description_header, "Description");

    let options = config.walker.options();
    assert!(options.infer_associative_lists);
    assert_eq!(options.merge_keys, config.walker.merge_keys);
}

#[test]
fn config_serialize_toml_roundtrip() {
    let config = ValuedocConfig::default();

    let text = toml::to_string(&config).unwrap();
    let parsed = ValuedocConfig::from_toml(&text, None).unwrap();

    assert_eq!(parsed, config);
}

#[test]
fn config_invalid_toml_reports_location() {
    let error = ValuedocConfig::from_toml("[walker\n", None).unwrap_err();

    match error {
        ValuedocError::TomlParseError { location, .. } => assert_eq!(location, "string"),
        other => panic!("expected TomlParseError, got {other:?}"),
    }
}

#[test]
fn config_wrong_type_is_rejected() {
    assert!(ValuedocConfig::from_toml("[walker]\nmerge_keys = 3\n", None).is_err());
}
