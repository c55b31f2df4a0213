//! Builder for creating transformer definitions
//!
//! This module provides a fluent builder API for declaring the default and
//! alternate transformations of one model type. Names are validated when the
//! definition is built, not when a transformation is selected.
//!
//! Copyright (c) 2025 Modelcast Team
//! Licensed under the Apache-2.0 license

use crate::model::Model;
use crate::{Error, Result};
use super::definition::TransformerDefinition;
use super::types::{normalize_transformation_name, TransformFn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for creating transformer definitions over model type `M`
pub struct TransformerBuilder<M> {
    name: String,
    default: Option<TransformFn>,
    alternates: Vec<(String, TransformFn)>,
    _model: PhantomData<fn(&M)>,
}

impl<M: Model + 'static> TransformerBuilder<M> {
    /// Create a new builder for the transformer type `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            alternates: Vec::new(),
            _model: PhantomData,
        }
    }

    /// Set the default transformation
    pub fn default<F>(self, transformation: F) -> Self
    where
        F: Fn(&M) -> Value + Send + Sync + 'static,
    {
        self.try_default(move |model| Ok(transformation(model)))
    }

    /// Set a default transformation that may fail
    pub fn try_default<F>(mut self, transformation: F) -> Self
    where
        F: Fn(&M) -> Result<Value> + Send + Sync + 'static,
    {
        self.default = Some(self.erase(transformation));
        self
    }

    /// Add a named alternate transformation
    pub fn alternate<F>(self, name: impl Into<String>, transformation: F) -> Self
    where
        F: Fn(&M) -> Value + Send + Sync + 'static,
    {
        self.try_alternate(name, move |model| Ok(transformation(model)))
    }

    /// Add a named alternate transformation that may fail
    pub fn try_alternate<F>(mut self, name: impl Into<String>, transformation: F) -> Self
    where
        F: Fn(&M) -> Result<Value> + Send + Sync + 'static,
    {
        let erased = self.erase(transformation);
        self.alternates.push((name.into(), erased));
        self
    }

    /// Build the transformer definition
    pub fn build(self) -> Result<TransformerDefinition> {
        if self.name.trim().is_empty() {
            return Err(Error::configuration("Transformer name is required"));
        }

        let default = self.default.ok_or_else(|| {
            Error::configuration(format!(
                "Transformer '{}' has no default transformation",
                self.name
            ))
        })?;

        let mut alternates = BTreeMap::new();
        for (raw_name, transformation) in self.alternates {
            let name = normalize_transformation_name(&raw_name);
            if name.is_empty() {
                return Err(Error::configuration(format!(
                    "Transformer '{}' has an alternate transformation without a name",
                    self.name
                )));
            }
            if alternates.contains_key(name) {
                return Err(Error::configuration(format!(
                    "Transformer '{}' defines the '{}' transformation twice",
                    self.name, name
                )));
            }
            alternates.insert(name.to_string(), transformation);
        }

        Ok(TransformerDefinition::new(self.name, default, alternates))
    }

    /// Wrap a typed transformation so it accepts any model and checks the type
    fn erase<F>(&self, transformation: F) -> TransformFn
    where
        F: Fn(&M) -> Result<Value> + Send + Sync + 'static,
    {
        let transformer = self.name.clone();
        Arc::new(move |item: &dyn Model| {
            let model = item.downcast_ref::<M>().ok_or_else(|| Error::ModelMismatch {
                transformer: transformer.clone(),
                expected: std::any::type_name::<M>().to_string(),
                found: item.model_name().to_string(),
            })?;
            transformation(model)
        })
    }
}
