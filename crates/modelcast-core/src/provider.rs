//! Transformer provider
//!
//! Startup glue that turns transformer definitions and the registry into
//! container bindings, so every transformer type the application knows about
//! can be made by name.

use crate::container::Container;
use crate::registry::TransformerRegistry;
use crate::transformer::TransformerDefinition;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Collects transformer definitions and registers them with a container
#[derive(Debug, Clone, Default)]
pub struct TransformerProvider {
    definitions: BTreeMap<String, Arc<TransformerDefinition>>,
}

impl TransformerProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition; two definitions with the same name are rejected
    pub fn definition(mut self, definition: impl Into<Arc<TransformerDefinition>>) -> Result<Self> {
        let definition = definition.into();
        let name = definition.name().to_string();

        if self.definitions.contains_key(&name) {
            return Err(Error::configuration(format!(
                "transformer '{}' is defined twice",
                name
            )));
        }

        self.definitions.insert(name, definition);
        Ok(self)
    }

    /// Add several definitions
    pub fn definitions<I, D>(self, definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<Arc<TransformerDefinition>>,
    {
        definitions
            .into_iter()
            .try_fold(self, |provider, definition| provider.definition(definition))
    }

    /// Look up a definition by transformer name
    pub fn get(&self, name: &str) -> Option<&Arc<TransformerDefinition>> {
        self.definitions.get(name)
    }

    /// Number of known definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no definition is known
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Bind every known definition in the container.
    ///
    /// Every transformer named by the registry must have a definition;
    /// otherwise nothing is bound and a configuration error is returned.
    /// Returns the number of bindings made.
    pub fn register(
        &self,
        registry: &TransformerRegistry,
        container: &mut Container,
    ) -> Result<usize> {
        let missing: Vec<_> = registry
            .transformer_types()
            .into_iter()
            .filter(|name| !self.definitions.contains_key(*name))
            .collect();

        if !missing.is_empty() {
            return Err(Error::configuration(format!(
                "registry references undefined transformers: {}",
                missing.join(", ")
            )));
        }

        for definition in self.definitions.values() {
            container.bind_transformer(Arc::clone(definition));
        }

        tracing::info!(
            transformers = self.definitions.len(),
            registered_models = registry.len(),
            "Transformers registered"
        );

        Ok(self.definitions.len())
    }

    /// Transformer type names the registry makes available, sorted
    pub fn provides(registry: &TransformerRegistry) -> Vec<String> {
        registry
            .transformer_types()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
