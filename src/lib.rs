//! valuedoc - Reference documentation from annotated YAML values files.
//!
//! valuedoc reads a values file (such as a Helm chart's `values.yaml`),
//! keeps the comments attached to every key, and turns each documented field
//! into a `(path, description, default)` row. The main features include:
//!
//! - Comment-preserving loader for the YAML subset used by values files
//! - `+doc-gen:ignore` and `+doc-gen:break` comment directives
//! - Inline JSON-Schema markers with `$ref` resolution against a registry
//! - Markdown table and README template rendering
//!
//! # Quick Start
//!
//! ```rust
//! use valuedoc::docs::generate_values_table;
//! use valuedoc::node::parse;
//!
//! let values = parse("# Number of replicas\nreplicas: 3\n").unwrap();
//! let rows = generate_values_table(&values, None).unwrap();
//!
//! assert_eq!(rows[0].path, "replicas");
//! assert_eq!(rows[0].description, "Number of replicas");
//! ```

/// Comment directives, descriptions and example blocks.
pub mod annotation;

/// `valuedoc.toml` settings.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Row extraction and documentation rendering.
pub mod docs;

/// Annotated document tree and YAML loader.
pub mod node;

/// Schema markers, type registry and reference resolution.
pub mod schema;

/// Logging setup for the binary.
pub mod tracing_config;

/// Schema-aware tree walker and visitor trait.
pub mod walk;

/// Re-exported core types for convenience.
pub use core::{Result, ValuedocError};
