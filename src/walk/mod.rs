//! Schema-aware traversal of annotated value trees.
//!
//! The [`Walker`] visits a source tree depth-first, asks a [`Visitor`] for the
//! destination node at every step, and assembles the results into a new tree.
//! Comment directives on map keys control the traversal:
//!
//! - `# +doc-gen:ignore` drops the field and everything below it.
//! - `# +doc-gen:break` treats the field as a leaf and stops descending.

mod associative;
mod error;
mod map;
mod path;
mod scalar;
mod sequence;
mod visitor;

#[cfg(test)]
mod tests;

pub use associative::{DEFAULT_MERGE_KEYS, infer_merge_key, merge_nodes};
pub use error::WalkError;
pub use path::{FieldPath, PATH_SEPARATOR, PathSegment};
pub use visitor::{IdentityVisitor, Visitor};

use tracing::debug;

use crate::{
    node::{Node, NodeKind},
    schema::{ResolvedSchema, SchemaResolver, TypeRegistry},
};

/// Traversal options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Call `visit_scalar` on every map key and honor key directives.
    ///
    /// Leaf visits and the `ignore`/`break` directives only happen when this
    /// is enabled.
    pub visit_keys_as_scalars: bool,
    /// Treat sequences of maps sharing an identifying field as associative
    /// lists, merging elements with equal keys.
    pub infer_associative_lists: bool,
    /// Candidate identifying fields, tried in order.
    pub merge_keys: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            visit_keys_as_scalars: false,
            infer_associative_lists: false,
            merge_keys: DEFAULT_MERGE_KEYS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Depth-first traversal driving a [`Visitor`].
///
/// # Example
///
/// ```
/// use valuedoc::node::parse;
/// use valuedoc::walk::{IdentityVisitor, Walker};
///
/// let source = parse("image:\n  repo: nginx\n").unwrap();
/// let mut visitor = IdentityVisitor;
/// let rebuilt = Walker::new(&mut visitor).walk(&source).unwrap();
/// assert_eq!(rebuilt, Some(source));
/// ```
pub struct Walker<'a, V: Visitor + ?Sized> {
    visitor: &'a mut V,
    resolver: SchemaResolver<'a>,
    options: WalkOptions,
}

impl<'a, V: Visitor + ?Sized> Walker<'a, V> {
    /// Creates a walker with default options and no type registry.
    pub fn new(visitor: &'a mut V) -> Self {
        Self {
            visitor,
            resolver: SchemaResolver::default(),
            options: WalkOptions::default(),
        }
    }

    /// Resolves schema references against the given registry.
    pub fn with_registry(mut self, registry: Option<&'a TypeRegistry>) -> Self {
        self.resolver = SchemaResolver::new(registry);
        self
    }

    /// Replaces all traversal options.
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Enables or disables key visits and key directives.
    pub fn visit_keys_as_scalars(mut self, enabled: bool) -> Self {
        self.options.visit_keys_as_scalars = enabled;
        self
    }

    /// Enables or disables associative list inference.
    pub fn infer_associative_lists(mut self, enabled: bool) -> Self {
        self.options.infer_associative_lists = enabled;
        self
    }

    /// Walks the tree from its root.
    ///
    /// Returns the destination tree, or `None` when the visitor dropped the
    /// root.
    ///
    /// # Errors
    ///
    /// Returns `WalkError` if the visitor fails or produces a destination that
    /// cannot hold the source's children.
    pub fn walk(&mut self, source: &Node) -> Result<Option<Node>, WalkError> {
        self.walk_with_schema(source, None)
    }

    /// Walks the tree from its root with a schema for the root node.
    ///
    /// # Errors
    ///
    /// Returns `WalkError` if the visitor fails or produces a destination that
    /// cannot hold the source's children.
    pub fn walk_with_schema(
        &mut self,
        source: &Node,
        schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        debug!(
            root = source.kind_name(),
            keys_as_scalars = self.options.visit_keys_as_scalars,
            associative = self.options.infer_associative_lists,
            "walking document"
        );
        let mut path = FieldPath::root();
        self.walk_node(source, schema, &mut path)
    }

    fn walk_node(
        &mut self,
        source: &Node,
        schema: Option<&ResolvedSchema>,
        path: &mut FieldPath,
    ) -> Result<Option<Node>, WalkError> {
        match &source.kind {
            NodeKind::Map(entries) => self.walk_map(source, entries, schema, path),
            NodeKind::Sequence(items) => self.walk_sequence(source, items, schema, path),
            NodeKind::Scalar(_) | NodeKind::Null => self.walk_scalar(source, schema),
        }
    }
}
