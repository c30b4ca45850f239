use crate::{node::Node, schema::ResolvedSchema};

use super::{FieldPath, WalkError};

/// Behavior invoked by the [`Walker`](super::Walker) at each decision point.
///
/// Every method returns the destination node for the visited source node.
/// Returning `None` from `visit_map` or `visit_sequence` drops the subtree:
/// the walker does not descend into it and the parent omits the field.
///
/// The default implementations rebuild the source unchanged: containers are
/// returned empty (the walker fills them) and scalars are cloned.
pub trait Visitor {
    /// Produces the destination for a map node.
    ///
    /// # Errors
    ///
    /// Returns `WalkError` to abort the walk.
    fn visit_map(
        &mut self,
        source: &Node,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        Ok(Some(source.empty_like()))
    }

    /// Produces the destination for a sequence node.
    ///
    /// # Errors
    ///
    /// Returns `WalkError` to abort the walk.
    fn visit_sequence(
        &mut self,
        source: &Node,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        Ok(Some(source.empty_like()))
    }

    /// Produces the destination for a scalar or null node.
    ///
    /// Also called for every map key when keys are visited as scalars; that
    /// result is discarded.
    ///
    /// # Errors
    ///
    /// Returns `WalkError` to abort the walk.
    fn visit_scalar(
        &mut self,
        source: &Node,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        Ok(Some(source.clone()))
    }

    /// Visits a field treated as a leaf: a scalar or empty value, or any value
    /// whose key carries a `break` directive.
    ///
    /// For `break` fields the returned node becomes the destination value.
    ///
    /// # Errors
    ///
    /// Returns `WalkError` to abort the walk.
    fn visit_leaf(
        &mut self,
        _key: &Node,
        value: &Node,
        _path: &FieldPath,
        _schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        Ok(Some(value.clone()))
    }
}

/// Visitor that returns every node unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityVisitor;

impl Visitor for IdentityVisitor {}
