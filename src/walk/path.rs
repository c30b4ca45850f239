use std::fmt;

/// Separator used when a path is displayed.
pub const PATH_SEPARATOR: &str = ".";

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A map field.
    Field(String),
    /// A sequence element addressed by position.
    Index(usize),
    /// A sequence element addressed by the value of its merge key.
    Keyed {
        /// Name of the identifying field (e.g. `name`).
        key: String,
        /// Value of the identifying field for this element.
        value: String,
    },
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{name}"),
            PathSegment::Index(index) => write!(f, "{index}"),
            PathSegment::Keyed { key, value } => write!(f, "{key}={value}"),
        }
    }
}

/// Location of a node relative to the document root, in declaration order.
///
/// # Example
///
/// ```
/// use valuedoc::walk::{FieldPath, PathSegment};
///
/// let mut path = FieldPath::root();
/// path.push(PathSegment::Field("image".to_string()));
/// path.push(PathSegment::Field("tag".to_string()));
/// assert_eq!(path.to_string(), "image.tag");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path of map fields.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        Self {
            segments: fields
                .iter()
                .map(|field| PathSegment::Field(field.as_ref().to_string()))
                .collect(),
        }
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Removes the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// The path segments from the root.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true when `self` is `other` or lies below it.
    pub fn starts_with(&self, other: &FieldPath) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(PATH_SEPARATOR)?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
