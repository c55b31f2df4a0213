//! Modelcast Core - Transformation engine for turning domain models into API-ready JSON
//!
//! This crate converts model instances, collections and paginated results into
//! plain JSON objects, optionally including nested related models and
//! alternate output shapes.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror` and `anyhow`
//! - **Models**: The [`Model`] capability the host implements for its domain types
//! - **Transformers**: [`Transformer`] dispatch, alternate transformations and relation recursion
//! - **Resolution**: [`Transformable`] models, the [`TransformerRegistry`] and the
//!   [`Resolver`] seam
//!
//! # Example
//!
//! ```
//! use modelcast_core::{
//!     fields_of, Container, Fields, Model, Result, TransformContext, TransformerBuilder,
//!     TransformerRegistry, Transformer,
//! };
//! use serde::Serialize;
//! use serde_json::json;
//!
//! #[derive(Debug, Serialize)]
//! struct User {
//!     name: String,
//!     email: String,
//! }
//!
//! impl Model for User {
//!     fn to_plain(&self) -> Result<Fields> {
//!         fields_of(self)
//!     }
//! }
//!
//! fn example() -> Result<()> {
//!     let definition = TransformerBuilder::<User>::new("UserTransformer")
//!         .default(|user| json!({ "name": user.name, "email": user.email }))
//!         .build()?;
//!
//!     let container = Container::new();
//!     let registry = TransformerRegistry::empty();
//!     let ctx = TransformContext::new(&container, &registry);
//!
//!     let user = User { name: "Ada".to_string(), email: "ada@example.com".to_string() };
//!     let output = Transformer::new(definition).transform_item(&user, &ctx)?;
//!     assert_eq!(output, json!({ "name": "Ada", "email": "ada@example.com" }));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod container;
pub mod context;
pub mod error;
pub mod model;
pub mod provider;
pub mod registry;
pub mod resolve;
pub mod transformer;

// Re-export main types for convenience
pub use container::{Container, Resolver};
pub use context::{TransformContext, DEFAULT_MAX_DEPTH};
pub use error::{Error, Result, ValueKind};
pub use model::{fields_of, Fields, Model, ModelRef, Page, Paginator, Related, Subject};
pub use provider::TransformerProvider;
pub use registry::TransformerRegistry;
pub use resolve::{
    make_registered, make_transformer, resolve_transformer, transformer_for, Transformable,
};
pub use transformer::{Transformer, TransformerBuilder, TransformerDefinition};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
