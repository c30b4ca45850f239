//! Schema metadata attached to values fields.
//!
//! Fields may carry an inline JSON-Schema fragment in a comment
//! (`# {"$ref": "#/definitions/Resources"}`). The resolver parses those
//! markers, follows references into a shared [`TypeRegistry`] and hands the
//! walker a [`ResolvedSchema`] used to enrich descriptions. Resolution is
//! best effort: anything that cannot be parsed or resolved yields no schema
//! rather than an error.

mod marker;
mod registry;
mod resolver;


pub use marker::SchemaMarker;
pub use registry::TypeRegistry;
pub use resolver::{ResolvedSchema, SchemaResolver};
