use tracing::{debug, trace};

use crate::{
    node::{Node, NodeKind},
    schema::ResolvedSchema,
};

use super::{FieldPath, PathSegment, Visitor, WalkError, Walker, associative};

impl<V: Visitor + ?Sized> Walker<'_, V> {
    pub(super) fn walk_sequence(
        &mut self,
        source: &Node,
        items: &[Node],
        schema: Option<&ResolvedSchema>,
        path: &mut FieldPath,
    ) -> Result<Option<Node>, WalkError> {
        let Some(mut dest) = self.visitor.visit_sequence(source, schema)? else {
            trace!(%path, "visitor dropped sequence");
            return Ok(None);
        };

        let merge_key = if self.options.infer_associative_lists {
            associative::infer_merge_key(items, &self.options.merge_keys)
        } else {
            None
        };

        let elements = match merge_key {
            Some(key) => self.walk_associative(items, &key, schema, path)?,
            None => self.walk_positional(items, schema, path)?,
        };

        let NodeKind::Sequence(dest_items) = &mut dest.kind else {
            return Err(WalkError::structural(
                path,
                format!("visitor returned a {} for a sequence", dest.kind_name()),
            ));
        };
        *dest_items = elements;

        Ok(Some(dest))
    }

    fn walk_positional(
        &mut self,
        items: &[Node],
        schema: Option<&ResolvedSchema>,
        path: &mut FieldPath,
    ) -> Result<Vec<Node>, WalkError> {
        let mut elements = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let element_schema = self.resolver.element_schema(item, schema);

            path.push(PathSegment::Index(index));
            let result = self.walk_node(item, element_schema.as_ref(), path);
            path.pop();

            elements.extend(result?);
        }

        Ok(elements)
    }

    fn walk_associative(
        &mut self,
        items: &[Node],
        key: &str,
        schema: Option<&ResolvedSchema>,
        path: &mut FieldPath,
    ) -> Result<Vec<Node>, WalkError> {
        let groups = associative::group_by_key(items, key);
        debug!(%path, key, elements = items.len(), groups = groups.len(), "walking associative list");

        let mut elements = Vec::with_capacity(groups.len());

        for (value, merged) in groups {
            let element_schema = self.resolver.element_schema(&merged, schema);

            path.push(PathSegment::Keyed {
                key: key.to_string(),
                value,
            });
            let result = self.walk_node(&merged, element_schema.as_ref(), path);
            path.pop();

            elements.extend(result?);
        }

        Ok(elements)
    }
}
