//! In-memory document model for annotated YAML values files.
//!
//! A parsed document is a tree of [`Node`]s. Every node carries the comments
//! that were attached to it in the source, and map entries keep their
//! declaration order so that generated documentation follows the file.

mod error;
mod flow;
mod parser;
mod render;
mod scanner;


pub use error::ParseError;
pub use parser::parse;

/// Comments attached to a node in the source document.
///
/// Both fields keep the raw comment text including the leading `#`; multi-line
/// head comments are joined with `\n`. An absent comment is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Comment lines directly preceding the node.
    pub head_comment: String,
    /// Trailing comment on the same line as the node.
    pub line_comment: String,
}

/// Quoting style a scalar was written with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Unquoted text.
    #[default]
    Plain,
    /// `'single quoted'`
    SingleQuoted,
    /// `"double quoted"`
    DoubleQuoted,
    /// `|` block scalar.
    Literal,
    /// `>` block scalar.
    Folded,
}

/// A scalar value with its decoded text and source style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scalar {
    /// Decoded scalar text (quotes removed, escapes applied).
    pub value: String,
    /// How the scalar was written.
    pub style: ScalarStyle,
}

/// A single `key: value` pair of a map node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// The key, always a scalar node. Its annotations hold the key's comments.
    pub key: Node,
    /// The value bound to the key.
    pub value: Node,
}

/// The shape of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Ordered key/value pairs.
    Map(Vec<MapEntry>),
    /// Ordered list of nodes.
    Sequence(Vec<Node>),
    /// Literal text value.
    Scalar(Scalar),
    /// Absent value (`key:` with nothing after it).
    Null,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What the node holds.
    pub kind: NodeKind,
    /// Comments attached to the node.
    pub annotations: Annotations,
}

impl Node {
    /// Creates a node of the given kind without comments.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            annotations: Annotations::default(),
        }
    }

    /// Creates a plain scalar node.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Scalar(Scalar {
            value: value.into(),
            style: ScalarStyle::Plain,
        }))
    }

    /// Creates a scalar node with an explicit style.
    pub fn scalar_with_style(value: impl Into<String>, style: ScalarStyle) -> Self {
        Self::new(NodeKind::Scalar(Scalar {
            value: value.into(),
            style,
        }))
    }

    /// Creates an empty map node.
    pub fn map() -> Self {
        Self::new(NodeKind::Map(Vec::new()))
    }

    /// Creates an empty sequence node.
    pub fn sequence() -> Self {
        Self::new(NodeKind::Sequence(Vec::new()))
    }

    /// Creates a null node.
    pub fn null() -> Self {
        Self::new(NodeKind::Null)
    }

    /// Replaces the node's annotations.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns a node of the same kind with no children, keeping annotations.
    ///
    /// Scalars and nulls are returned as clones.
    pub fn empty_like(&self) -> Self {
        let kind = match &self.kind {
            NodeKind::Map(_) => NodeKind::Map(Vec::new()),
            NodeKind::Sequence(_) => NodeKind::Sequence(Vec::new()),
            other => other.clone(),
        };
        Self {
            kind,
            annotations: self.annotations.clone(),
        }
    }

    /// Returns true for scalar nodes.
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, NodeKind::Scalar(_))
    }

    /// Returns true when the node carries no meaningful value.
    ///
    /// Null nodes, empty collections, empty scalars and plain `~`/`null`
    /// scalars are empty.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            NodeKind::Null => true,
            NodeKind::Map(entries) => entries.is_empty(),
            NodeKind::Sequence(items) => items.is_empty(),
            NodeKind::Scalar(scalar) => {
                scalar.value.is_empty()
                    || (scalar.style == ScalarStyle::Plain
                        && matches!(scalar.value.as_str(), "~" | "null" | "Null" | "NULL"))
            }
        }
    }

    /// Returns the scalar text, if this is a scalar node.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Scalar(scalar) => Some(&scalar.value),
            _ => None,
        }
    }

    /// Returns the map entries, if this is a map node.
    pub fn entries(&self) -> Option<&[MapEntry]> {
        match &self.kind {
            NodeKind::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the sequence items, if this is a sequence node.
    pub fn items(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a map entry by key name.
    pub fn field(&self, name: &str) -> Option<&MapEntry> {
        self.entries()?
            .iter()
            .find(|entry| entry.key.as_scalar() == Some(name))
    }

    /// Looks up a map value by key name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.field(name).map(|entry| &entry.value)
    }

    /// Returns the key names of a map node in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.entries()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.key.as_scalar())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Short name of the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Map(_) => "map",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Scalar(_) => "scalar",
            NodeKind::Null => "null",
        }
    }
}

impl MapEntry {
    /// Creates an entry from a key node and a value.
    pub fn new(key: Node, value: Node) -> Self {
        Self { key, value }
    }

    /// Returns the key text.
    pub fn name(&self) -> &str {
        self.key.as_scalar().unwrap_or_default()
    }
}
