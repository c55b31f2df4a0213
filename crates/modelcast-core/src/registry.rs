//! Model to transformer registry
//!
//! A read-only mapping from model type names to transformer type names. It is
//! built once at startup and passed to the engine through
//! [`TransformContext`](crate::TransformContext); nothing looks it up from
//! ambient state.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Read-only mapping from model type name to transformer type name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformerRegistry {
    entries: BTreeMap<String, String>,
}

impl TransformerRegistry {
    /// An empty registry: every lookup falls through to other resolution paths
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from `(model, transformer)` pairs.
    ///
    /// Blank names and a model mapped to two different transformers are
    /// rejected.
    pub fn from_entries<I, M, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (M, T)>,
        M: Into<String>,
        T: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (model, transformer) in entries {
            let model = model.into();
            let transformer = transformer.into();

            if let Some(existing) = map.get(&model) {
                if existing != &transformer {
                    return Err(Error::configuration(format!(
                        "model '{}' is mapped to both '{}' and '{}'",
                        model, existing, transformer
                    )));
                }
            }
            map.insert(model, transformer);
        }

        let registry = Self { entries: map };
        registry.validate()?;
        Ok(registry)
    }

    /// Check that no entry has a blank model or transformer name
    pub fn validate(&self) -> Result<()> {
        for (model, transformer) in &self.entries {
            if model.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "registry entry for transformer '{}' has an empty model name",
                    transformer
                )));
            }
            if transformer.trim().is_empty() {
                return Err(Error::configuration(format!(
                    "registry entry for model '{}' has an empty transformer name",
                    model
                )));
            }
        }
        Ok(())
    }

    /// Whether a transformer is registered for the model
    pub fn has(&self, model: &str) -> bool {
        self.entries.contains_key(model)
    }

    /// Whether a transformer can be made for the model from the registry alone
    pub fn can_make(&self, model: &str) -> bool {
        self.has(model)
    }

    /// Transformer type name registered for the model
    pub fn get(&self, model: &str) -> Option<&str> {
        self.entries.get(model).map(String::as_str)
    }

    /// Iterate over `(model, transformer)` pairs in model-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(model, transformer)| (model.as_str(), transformer.as_str()))
    }

    /// Distinct transformer type names, sorted
    pub fn transformer_types(&self) -> BTreeSet<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no model is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
