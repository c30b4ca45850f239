use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::annotation::comment_value;

/// An inline schema fragment parsed from a comment.
///
/// The well-known keys are exposed as fields; everything else is kept in
/// `extra` and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaMarker {
    /// Human-readable description of the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON-Schema type (a string or an array of strings).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<Value>,

    /// Reference into the type registry.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Remaining schema keywords.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaMarker {
    /// Parses a single comment line as a schema marker.
    ///
    /// The comment text must be a JSON object. Returns `None` for anything
    /// else, including malformed JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use valuedoc::schema::SchemaMarker;
    ///
    /// let marker = SchemaMarker::parse(r##"# {"$ref": "#/definitions/Image"}"##).unwrap();
    /// assert_eq!(marker.reference.as_deref(), Some("#/definitions/Image"));
    /// assert!(SchemaMarker::parse("# just a description").is_none());
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let value = comment_value(line);
        if !value.starts_with('{') {
            return None;
        }

        serde_json::from_str(&value).ok()
    }

    /// Finds the first marker among the lines of a comment.
    pub fn from_comment(comment: &str) -> Option<Self> {
        comment.lines().find_map(Self::parse)
    }

    /// Returns true when the marker declares nothing.
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.type_name.is_none()
            && self.reference.is_none()
            && self.extra.is_empty()
    }

    /// Converts the marker back into a JSON-Schema fragment.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}
