//! Transformer system for turning domain models into JSON
//!
//! A [`Transformer`] converts one model into one JSON object. It can be told
//! to include related models through dot-separated relation paths, and to use
//! a named alternate transformation instead of the default one.
//!
//! # Module Organization
//!
//! - [`types`] - Shared types and name normalization
//! - [`definition`] - Immutable sets of transformation functions
//! - [`builder`] - Fluent builder API for creating definitions
//! - [`engine`] - Dispatch and relation-aware recursion
//! - [`relations`] - Relation path parsing and the recursion guard
//!
//! # Examples
//!
//! ```
//! use modelcast_core::{fields_of, Fields, Model, Result, TransformerBuilder, Transformer};
//! use serde::Serialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Serialize)]
//! struct Tag {
//!     name: String,
//! }
//!
//! impl Model for Tag {
//!     fn to_plain(&self) -> Result<Fields> {
//!         fields_of(self)
//!     }
//! }
//!
//! let definition = TransformerBuilder::<Tag>::new("TagTransformer")
//!     .default(|tag| json!({ "name": tag.name }))
//!     .build()
//!     .unwrap();
//!
//! let transformer = Transformer::new(definition);
//! let tag = Tag { name: "rust".to_string() };
//! let fields = transformer.transformation(&tag).unwrap();
//! assert_eq!(fields["name"], json!("rust"));
//! ```
//!
//! Copyright (c) 2025 Modelcast Team
//! Licensed under the Apache-2.0 license

// Shared types and name normalization
pub mod types;

// Transformation function sets
pub mod definition;

// Definition builder API
pub mod builder;

// Dispatch and recursion
pub mod engine;

// Relation paths and recursion guard
pub mod relations;


pub use builder::TransformerBuilder;
pub use definition::TransformerDefinition;
pub use engine::Transformer;
pub use relations::{relation_key, split_relation_path};
pub use types::{normalize_transformation_name, TransformFn, TRANSFORMATION_SUFFIX};
