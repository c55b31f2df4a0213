//! Resolution service seam
//!
//! The host framework owns dependency resolution. The engine only needs
//! "make an instance of type X", expressed by [`Resolver`]. [`Container`] is a
//! minimal type-erased implementation for applications without their own.

use crate::transformer::{Transformer, TransformerDefinition};
use crate::{Error, Result};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Makes instances of named types
pub trait Resolver {
    /// Make an instance of the named type
    fn make(&self, type_name: &str) -> Result<Box<dyn Any>>;

    /// Whether the named type can be made
    fn has(&self, type_name: &str) -> bool;
}

type Factory = Box<dyn Fn() -> anyhow::Result<Box<dyn Any>>>;

/// Type-erased factory bindings keyed by type name
#[derive(Default)]
pub struct Container {
    bindings: BTreeMap<String, Factory>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a type name to an infallible factory, replacing any earlier binding
    pub fn bind<T, F>(&mut self, type_name: impl Into<String>, factory: F) -> &mut Self
    where
        T: Any,
        F: Fn() -> T + 'static,
    {
        self.bindings.insert(
            type_name.into(),
            Box::new(move || Ok(Box::new(factory()) as Box<dyn Any>)),
        );
        self
    }

    /// Bind a type name to a factory that may fail
    pub fn try_bind<T, F>(&mut self, type_name: impl Into<String>, factory: F) -> &mut Self
    where
        T: Any,
        F: Fn() -> anyhow::Result<T> + 'static,
    {
        self.bindings.insert(
            type_name.into(),
            Box::new(move || factory().map(|value| Box::new(value) as Box<dyn Any>)),
        );
        self
    }

    /// Bind the definition's name to a factory producing fresh transformers
    pub fn bind_transformer(&mut self, definition: Arc<TransformerDefinition>) -> &mut Self {
        let name = definition.name().to_string();
        self.bind(name, move || Transformer::new(Arc::clone(&definition)))
    }

    /// Bound type names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Resolver for Container {
    fn make(&self, type_name: &str) -> Result<Box<dyn Any>> {
        let factory = self.bindings.get(type_name).ok_or_else(|| Error::Resolution {
            type_name: type_name.to_string(),
            source: anyhow::anyhow!("no binding registered for '{}'", type_name),
        })?;

        factory().map_err(|source| Error::Resolution {
            type_name: type_name.to_string(),
            source,
        })
    }

    fn has(&self, type_name: &str) -> bool {
        self.bindings.contains_key(type_name)
    }
}
