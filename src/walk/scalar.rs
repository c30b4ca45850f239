use crate::{node::Node, schema::ResolvedSchema};

use super::{Visitor, WalkError, Walker};

impl<V: Visitor + ?Sized> Walker<'_, V> {
    pub(super) fn walk_scalar(
        &mut self,
        source: &Node,
        schema: Option<&ResolvedSchema>,
    ) -> Result<Option<Node>, WalkError> {
        self.visitor.visit_scalar(source, schema)
    }
}
