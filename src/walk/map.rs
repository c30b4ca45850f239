use tracing::{debug, trace};

use crate::{
    annotation::{Directive, has_directive},
    node::{MapEntry, Node, NodeKind},
    schema::ResolvedSchema,
};

use super::{FieldPath, PathSegment, Visitor, WalkError, Walker};

impl<V: Visitor + ?Sized> Walker<'_, V> {
    pub(super) fn walk_map(
        &mut self,
        source: &Node,
        entries: &[MapEntry],
        schema: Option<&ResolvedSchema>,
        path: &mut FieldPath,
    ) -> Result<Option<Node>, WalkError> {
        let Some(mut dest) = self.visitor.visit_map(source, schema)? else {
            trace!(%path, "visitor dropped map");
            return Ok(None);
        };

        if !matches!(dest.kind, NodeKind::Map(_)) {
            return Err(WalkError::structural(
                path,
                format!("visitor returned a {} for a map", dest.kind_name()),
            ));
        }

        for entry in entries {
            if entry.key.as_scalar().is_none() {
                return Err(WalkError::structural(
                    path,
                    format!("map key is a {}, expected a scalar", entry.key.kind_name()),
                ));
            }

            path.push(PathSegment::Field(entry.name().to_string()));
            let result = self.walk_field(&mut dest, entry, schema, path);
            path.pop();
            result?;
        }

        Ok(Some(dest))
    }

    fn walk_field(
        &mut self,
        dest: &mut Node,
        entry: &MapEntry,
        parent_schema: Option<&ResolvedSchema>,
        path: &mut FieldPath,
    ) -> Result<(), WalkError> {
        let keys_as_scalars = self.options.visit_keys_as_scalars;
        let mut breakout = false;

        if keys_as_scalars {
            self.visitor.visit_scalar(&entry.key, None)?;

            let comments = &entry.key.annotations;
            if has_directive(&comments.line_comment, Directive::Ignore)
                || has_directive(&comments.head_comment, Directive::Ignore)
            {
                debug!(%path, "ignoring field");
                return set_field(dest, &entry.key, None, path);
            }

            breakout = has_directive(&comments.line_comment, Directive::Break);
        }

        let schema = self.resolver.field_schema(entry, parent_schema);

        if keys_as_scalars && (entry.value.is_scalar() || entry.value.is_empty() || breakout) {
            let leaf = self
                .visitor
                .visit_leaf(&entry.key, &entry.value, path, schema.as_ref())?;

            if breakout {
                debug!(%path, "break directive, not descending");
                return set_field(dest, &entry.key, leaf, path);
            }
        }

        let value = self.walk_node(&entry.value, schema.as_ref(), path)?;
        set_field(dest, &entry.key, value, path)
    }
}

/// Sets, replaces or removes a field of a destination map.
///
/// An existing field keeps its position; a new one is appended. `None`
/// removes the field.
fn set_field(
    dest: &mut Node,
    key: &Node,
    value: Option<Node>,
    path: &FieldPath,
) -> Result<(), WalkError> {
    let NodeKind::Map(entries) = &mut dest.kind else {
        return Err(WalkError::structural(
            path,
            format!("cannot set a field on a {}", dest.kind_name()),
        ));
    };

    let name = key.as_scalar();
    match value {
        Some(value) => {
            match entries.iter_mut().find(|entry| entry.key.as_scalar() == name) {
                Some(existing) => existing.value = value,
                None => entries.push(MapEntry::new(key.clone(), value)),
            }
        }
        None => entries.retain(|entry| entry.key.as_scalar() != name),
    }

    Ok(())
}
