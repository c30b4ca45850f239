use std::{collections::HashMap, fs, path::Path};

use schemars::Schema;
use serde_json::Value;
use tracing::debug;

use crate::{Result, ValuedocError};

const MAX_REFERENCE_HOPS: usize = 32;
const DEFINITION_SECTIONS: [&str; 2] = ["definitions", "$defs"];

/// Shared, read-only index of named schema fragments.
///
/// Entries are keyed by the reference string used in `$ref`
/// (`#/definitions/Image`, `#/$defs/Image`). The registry is never mutated
/// during a walk, so one instance can serve any number of walks, including
/// concurrent ones.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    definitions: HashMap<String, Value>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a JSON-Schema document.
    ///
    /// Every entry of the `definitions` and `$defs` sections is registered
    /// under `#/<section>/<name>`, and the document itself under `#`.
    pub fn from_document(document: &Value) -> Self {
        let mut registry = Self::new();
        registry.insert("#", document.clone());

        for section in DEFINITION_SECTIONS {
            let Some(definitions) = document.get(section).and_then(Value::as_object) else {
                continue;
            };
            for (name, schema) in definitions {
                registry.insert(format!("#/{section}/{name}"), schema.clone());
            }
        }

        debug!(entries = registry.len(), "built type registry");
        registry
    }

    /// Builds a registry from a schema generated with `schemars`.
    ///
    /// # Example
    ///
    /// ```
    /// use schemars::{JsonSchema, schema_for};
    /// use valuedoc::schema::TypeRegistry;
    ///
    /// #[derive(JsonSchema)]
    /// struct Image {
    ///     /// Image repository.
    ///     repository: String,
    /// }
    ///
    /// #[derive(JsonSchema)]
    /// struct Values {
    ///     image: Image,
    /// }
    ///
    /// let registry = TypeRegistry::from_schema(&schema_for!(Values));
    /// assert!(registry.resolve("#/$defs/Image").is_some());
    /// ```
    pub fn from_schema(schema: &Schema) -> Self {
        Self::from_document(schema.as_value())
    }

    /// Loads a registry from a JSON-Schema file.
    ///
    /// # Errors
    ///
    /// Returns `ValuedocError::IoError` if the file cannot be read and
    /// `ValuedocError::RegistryError` if it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ValuedocError::io(e, path))?;

        let document: Value =
            serde_json::from_str(&content).map_err(|e| ValuedocError::RegistryError {
                location: path.display().to_string(),
                details: e.to_string(),
            })?;

        Ok(Self::from_document(&document))
    }

    /// Registers a schema fragment under a reference.
    pub fn insert(&mut self, reference: impl Into<String>, schema: Value) {
        self.definitions.insert(reference.into(), schema);
    }

    /// Resolves a reference to its schema fragment.
    ///
    /// Bare names (`Image`) are looked up in both definition sections.
    /// Fragments that are themselves pure references are followed; a cycle
    /// or an overly long chain resolves to `None`.
    pub fn resolve(&self, reference: &str) -> Option<&Value> {
        let mut current = self.lookup(reference)?;

        for _ in 0..MAX_REFERENCE_HOPS {
            let next = current
                .as_object()
                .filter(|object| object.len() == 1)
                .and_then(|object| object.get("$ref"))
                .and_then(Value::as_str);

            match next {
                Some(next_ref) => current = self.lookup(next_ref)?,
                None => return Some(current),
            }
        }

        debug!(reference, "reference chain too long, treating as unresolved");
        None
    }

    /// Returns true when the reference is registered.
    pub fn contains(&self, reference: &str) -> bool {
        self.lookup(reference).is_some()
    }

    /// Number of registered fragments.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn lookup(&self, reference: &str) -> Option<&Value> {
        if let Some(schema) = self.definitions.get(reference) {
            return Some(schema);
        }
        if reference.starts_with('#') {
            return None;
        }

        DEFINITION_SECTIONS
            .iter()
            .find_map(|section| self.definitions.get(&format!("#/{section}/{reference}")))
    }
}
