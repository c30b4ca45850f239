//! Unit tests for comment annotations

use crate::annotation::{
    Directive, comment_example_value, comment_value, description, example, has_directive,
};

#[test]
fn comment_value_trims_marker_and_whitespace() {
    assert_eq!(comment_value("# hello "), "hello");
    assert_eq!(comment_value("   #hello"), "hello");
    assert_eq!(comment_value("## twice"), "# twice");
    assert_eq!(comment_value("no marker"), "no marker");
    assert_eq!(comment_value(""), "");
}

#[test]
fn comment_example_value_keeps_inner_and_trailing_whitespace() {
    assert_eq!(comment_example_value("#   key: value  "), "   key: value  ");
    assert_eq!(comment_example_value("  # - a"), " - a");
}

#[test]
fn directives_require_exact_tokens() {
    assert_eq!(Directive::parse("# +doc-gen:ignore"), Some(Directive::Ignore));
    assert_eq!(Directive::parse("#+doc-gen:break   "), Some(Directive::Break));

    assert_eq!(Directive::parse("# +doc-gen:ignored"), None);
    assert_eq!(Directive::parse("# +doc-gen:Ignore"), None);
    assert_eq!(Directive::parse("# please +doc-gen:ignore"), None);
    assert_eq!(Directive::parse("# +doc-gen: break"), None);
}

#[test]
fn has_directive_matches_whole_comment() {
    assert!(has_directive("# +doc-gen:ignore", Directive::Ignore));
    assert!(has_directive("  #+doc-gen:break ", Directive::Break));
    assert!(!has_directive("# +doc-gen:ignore", Directive::Break));
    assert!(!has_directive("", Directive::Ignore));

    let head = "# Service account settings\n# +doc-gen:ignore";
    assert!(!has_directive(head, Directive::Ignore));
    assert_eq!(Directive::parse(head), None);
}

#[test]
fn description_joins_lines_and_skips_control_text() {
    let head = r#"# Number of replicas
#   to run.
# {"type": "integer"}
#
# Example:
#   replicas: 5"#;

    assert_eq!(description(head), "Number of replicas to run.");
}

#[test]
fn malformed_directive_is_description() {
    assert_eq!(description("# +doc-gen:skip"), "+doc-gen:skip");
}

#[test]
fn directive_comment_has_no_description() {
    assert_eq!(description("# +doc-gen:break"), "");
}

#[test]
fn directive_inside_longer_comment_is_description() {
    let head = "# Service account settings\n# +doc-gen:ignore";

    assert_eq!(description(head), "Service account settings +doc-gen:ignore");
}

#[test]
fn example_preserves_formatting() {
    let head = "# Node labels\n# Example:\n#   disktype: ssd\n#   zone:  a";

    assert_eq!(example(head).as_deref(), Some("   disktype: ssd\n   zone:  a"));
    assert_eq!(example("# Node labels"), None);
    assert_eq!(example("# Example:\n#"), None);
}
