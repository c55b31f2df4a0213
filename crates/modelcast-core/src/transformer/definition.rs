//! Transformer definitions
//!
//! A definition is the immutable set of transformation functions for one model
//! type: the mandatory default plus any named alternates. It replaces a
//! per-model transformer subclass and is shared by every [`Transformer`]
//! instance made from it.
//!
//! [`Transformer`]: super::Transformer
//!
//! Copyright (c) 2025 Modelcast Team
//! Licensed under the Apache-2.0 license

use crate::error::ValueKind;
use crate::model::{Fields, Model};
use crate::{Error, Result};
use super::types::{normalize_transformation_name, TransformFn, DEFAULT_TRANSFORMATION};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Named transformation functions for one model type
#[derive(Clone)]
pub struct TransformerDefinition {
    /// Transformer type name, the key used by the resolution service
    name: String,
    /// Default transformation
    default: TransformFn,
    /// Alternate transformations keyed by normalized name
    alternates: BTreeMap<String, TransformFn>,
}

impl TransformerDefinition {
    pub(crate) fn new(
        name: String,
        default: TransformFn,
        alternates: BTreeMap<String, TransformFn>,
    ) -> Self {
        Self {
            name,
            default,
            alternates,
        }
    }

    /// Transformer type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an alternate with this (possibly suffixed) name exists
    pub fn has_alternate(&self, name: &str) -> bool {
        self.alternates.contains_key(normalize_transformation_name(name))
    }

    /// Names of the alternate transformations, sorted
    pub fn alternate_names(&self) -> impl Iterator<Item = &str> {
        self.alternates.keys().map(String::as_str)
    }

    /// Run the default transformation
    pub(crate) fn apply_default(&self, item: &dyn Model) -> Result<Fields> {
        let value = (self.default)(item)?;
        self.expect_object(DEFAULT_TRANSFORMATION, value)
    }

    /// Run a named alternate transformation; `name` must already be normalized
    pub(crate) fn apply_alternate(&self, name: &str, item: &dyn Model) -> Result<Fields> {
        let transformation = self
            .alternates
            .get(name)
            .ok_or_else(|| Error::UnknownTransformation {
                transformer: self.name.clone(),
                name: name.to_string(),
            })?;

        let value = transformation(item)?;
        self.expect_object(name, value)
    }

    fn expect_object(&self, transformation: &str, value: Value) -> Result<Fields> {
        match value {
            Value::Object(fields) => Ok(fields),
            other => Err(Error::MalformedOutput {
                transformer: self.name.clone(),
                transformation: transformation.to_string(),
                kind: ValueKind::of(&other),
            }),
        }
    }
}

impl fmt::Debug for TransformerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerDefinition")
            .field("name", &self.name)
            .field("alternates", &self.alternates.keys().collect::<Vec<_>>())
            .finish()
    }
}
