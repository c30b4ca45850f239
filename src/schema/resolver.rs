use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::node::{MapEntry, Node};

use super::{SchemaMarker, TypeRegistry};

/// A schema fragment with its top-level reference already followed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema {
    schema: Value,
}

impl ResolvedSchema {
    /// Wraps a fragment that needs no further resolution.
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    /// The underlying JSON-Schema fragment.
    pub fn as_value(&self) -> &Value {
        &self.schema
    }

    /// The `description` keyword, if present and non-empty.
    pub fn description(&self) -> Option<&str> {
        self.schema
            .get("description")
            .and_then(Value::as_str)
            .filter(|description| !description.trim().is_empty())
    }

    /// The `type` keyword; union types are joined with `|`.
    pub fn type_name(&self) -> Option<String> {
        match self.schema.get("type")? {
            Value::String(name) => Some(name.clone()),
            Value::Array(names) => Some(
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("|"),
            ),
            _ => None,
        }
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.schema
            .get("properties")
            .and_then(|properties| properties.get(name))
            .or_else(|| {
                self.schema
                    .get("additionalProperties")
                    .filter(|additional| additional.is_object())
            })
    }

    fn items(&self) -> Option<&Value> {
        match self.schema.get("items")? {
            Value::Array(items) => items.first(),
            items => Some(items),
        }
    }
}

/// Resolves field schemas from comment markers and parent schemas.
///
/// Holds an optional handle to the shared registry; without one, references
/// stay unresolved and only locally declared fragments are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaResolver<'a> {
    registry: Option<&'a TypeRegistry>,
}

impl<'a> SchemaResolver<'a> {
    /// Creates a resolver backed by the given registry.
    pub fn new(registry: Option<&'a TypeRegistry>) -> Self {
        Self { registry }
    }

    /// Resolves a fragment, following its `$ref` when possible.
    ///
    /// Keywords declared next to the reference override those of the
    /// referenced schema. An unresolved reference leaves the local fragment
    /// as it is.
    pub fn resolve_fragment(&self, fragment: &Value) -> ResolvedSchema {
        let Some(reference) = fragment.get("$ref").and_then(Value::as_str) else {
            return ResolvedSchema::new(fragment.clone());
        };

        let Some(target) = self.registry.and_then(|registry| registry.resolve(reference)) else {
            debug!(reference, "unresolved schema reference, using local schema");
            return ResolvedSchema::new(fragment.clone());
        };

        let mut merged = target.as_object().cloned().unwrap_or_else(Map::new);
        if let Some(local) = fragment.as_object() {
            for (keyword, value) in local {
                if keyword != "$ref" {
                    merged.insert(keyword.clone(), value.clone());
                }
            }
        }

        trace!(reference, "resolved schema reference");
        ResolvedSchema::new(Value::Object(merged))
    }

    /// Resolves the schema of a map field.
    ///
    /// A marker in the comments of the field takes precedence over the schema
    /// inherited from the parent's `properties`.
    pub fn field_schema(
        &self,
        entry: &MapEntry,
        parent: Option<&ResolvedSchema>,
    ) -> Option<ResolvedSchema> {
        self.marker_schema(&entry.value, Some(&entry.key))
            .or_else(|| {
                parent
                    .and_then(|schema| schema.property(entry.name()))
                    .map(|fragment| self.resolve_fragment(fragment))
            })
    }

    /// Resolves the schema of a sequence element.
    pub fn element_schema(
        &self,
        element: &Node,
        parent: Option<&ResolvedSchema>,
    ) -> Option<ResolvedSchema> {
        self.marker_schema(element, None).or_else(|| {
            parent
                .and_then(ResolvedSchema::items)
                .map(|fragment| self.resolve_fragment(fragment))
        })
    }

    /// Parses a schema marker from a value's line comment, falling back to the
    /// key's line comment.
    ///
    /// Sequence-valued fields carry their marker on the key, since the value
    /// starts on the following line.
    pub fn marker_schema(&self, value: &Node, key: Option<&Node>) -> Option<ResolvedSchema> {
        let marker = non_empty_marker(value)
            .or_else(|| key.and_then(non_empty_marker))?;

        Some(self.resolve_fragment(&marker.to_value()))
    }
}

fn non_empty_marker(node: &Node) -> Option<SchemaMarker> {
    SchemaMarker::from_comment(&node.annotations.line_comment).filter(|marker| !marker.is_empty())
}
