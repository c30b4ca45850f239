//! Single-line rendering of nodes, used for the Default column.

use std::fmt::Write as _;

use super::{Node, NodeKind, Scalar, ScalarStyle};

impl Node {
    /// Renders the node as single-line YAML.
    ///
    /// Scalars keep the quoting they were written with, collections use flow
    /// style and null renders as an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// let root = valuedoc::node::parse("image:\n  repo: nginx\n  tag: \"1.21\"\n").unwrap();
    /// assert_eq!(root.get("image").unwrap().render_flow(), r#"{repo: nginx, tag: "1.21"}"#);
    /// ```
    pub fn render_flow(&self) -> String {
        let mut out = String::new();
        write_flow(&mut out, self, true);
        out
    }
}

fn write_flow(out: &mut String, node: &Node, top_level: bool) {
    match &node.kind {
        NodeKind::Null if top_level => {}
        NodeKind::Null => out.push_str("null"),
        NodeKind::Scalar(scalar) => write_scalar(out, scalar),
        NodeKind::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(out, item, false);
            }
            out.push(']');
        }
        NodeKind::Map(entries) => {
            out.push('{');
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_flow(out, &entry.key, false);
                out.push_str(": ");
                write_flow(out, &entry.value, false);
            }
            out.push('}');
        }
    }
}

fn write_scalar(out: &mut String, scalar: &Scalar) {
    match scalar.style {
        ScalarStyle::Plain => out.push_str(&scalar.value),
        ScalarStyle::SingleQuoted => {
            let _ = write!(out, "'{}'", scalar.value.replace('\'', "''"));
        }
        ScalarStyle::DoubleQuoted | ScalarStyle::Literal | ScalarStyle::Folded => {
            write_double_quoted(out, &scalar.value);
        }
    }
}

fn write_double_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
