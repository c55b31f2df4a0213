//! Transformer implementation
//!
//! This module contains the dispatch logic that turns models, batches and
//! pages into JSON, and the relation-aware recursion that splices nested
//! transformer output under each relation's key.
//!
//! Copyright (c) 2025 Modelcast Team
//! Licensed under the Apache-2.0 license

use crate::context::TransformContext;
use crate::model::{Fields, Model, ModelRef, Subject};
use crate::resolve;
use crate::{Error, Result};
use super::definition::TransformerDefinition;
use super::relations::{relation_key, split_relation_path, Trail};
use super::types::normalize_transformation_name;
use serde_json::Value;
use std::sync::Arc;

/// Transforms models of one type into JSON objects
///
/// A transformer carries mutable configuration: the relation paths added by
/// [`with`](Self::with) and the alternate transformation picked by
/// [`set_transformation`](Self::set_transformation). Both persist across
/// `transform` calls until [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct Transformer {
    /// Shared transformation functions
    definition: Arc<TransformerDefinition>,
    /// Relation paths to include, in insertion order without duplicates
    related: Vec<String>,
    /// Normalized name of the selected alternate transformation
    active: Option<String>,
}

impl Transformer {
    /// Create a transformer with no relations and the default transformation
    pub fn new(definition: impl Into<Arc<TransformerDefinition>>) -> Self {
        Self {
            definition: definition.into(),
            related: Vec::new(),
            active: None,
        }
    }

    /// Transformer type name
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// The shared definition
    pub fn definition(&self) -> &Arc<TransformerDefinition> {
        &self.definition
    }

    /// Configured relation paths
    pub fn related(&self) -> &[String] {
        &self.related
    }

    /// Selected alternate transformation, `None` for the default
    pub fn active_transformation(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Include one relation path.
    ///
    /// Replaces any previously configured relations and clears the selected
    /// alternate transformation.
    pub fn with(&mut self, relation: impl Into<String>) -> &mut Self {
        self.with_all([relation])
    }

    /// Include several relation paths.
    ///
    /// Like [`with`](Self::with): previous relations and the selected
    /// alternate transformation are discarded first.
    pub fn with_all<I, S>(&mut self, relations: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reset();

        for relation in relations {
            let relation = relation.into();
            if !self.related.contains(&relation) {
                self.related.push(relation);
            }
        }

        self
    }

    /// Select an alternate transformation by name.
    ///
    /// A trailing `Transformation` suffix is ignored, so `"admin"` and
    /// `"adminTransformation"` select the same strategy.
    pub fn set_transformation(&mut self, name: &str) -> Result<&mut Self> {
        let normalized = normalize_transformation_name(name);

        if !self.definition.has_alternate(normalized) {
            return Err(Error::UnknownTransformation {
                transformer: self.name().to_string(),
                name: name.to_string(),
            });
        }

        self.active = Some(normalized.to_string());
        Ok(self)
    }

    /// Clear relations and the selected alternate transformation
    pub fn reset(&mut self) -> &mut Self {
        self.related.clear();
        self.active = None;
        self
    }

    /// Transform a model, a batch of models, or a page.
    ///
    /// A single model yields a JSON object; batches and pages yield an array
    /// with one object per item, in order.
    pub fn transform<'s>(
        &self,
        subject: impl Into<Subject<'s>>,
        ctx: &TransformContext<'_>,
    ) -> Result<Value> {
        let mut trail = Trail::new(ctx.max_depth());
        self.transform_guarded(subject.into(), ctx, &mut trail)
    }

    /// Transform a single model
    pub fn transform_item(&self, item: &dyn Model, ctx: &TransformContext<'_>) -> Result<Value> {
        self.transform(Subject::One(item), ctx)
    }

    /// Transform a batch of models
    pub fn transform_collection(
        &self,
        items: &[ModelRef],
        ctx: &TransformContext<'_>,
    ) -> Result<Value> {
        self.transform(Subject::Many(items), ctx)
    }

    /// Default transformation of one item, without relations
    pub fn transformation(&self, item: &dyn Model) -> Result<Fields> {
        self.definition.apply_default(item)
    }

    /// Selected alternate transformation of one item, or the default if none
    /// is selected
    pub fn alternate_transformation(&self, item: &dyn Model) -> Result<Fields> {
        match &self.active {
            Some(name) => self.definition.apply_alternate(name, item),
            None => self.transformation(item),
        }
    }

    /// Default transformation of one item plus every configured relation
    pub fn transform_with_related(
        &self,
        item: &dyn Model,
        ctx: &TransformContext<'_>,
    ) -> Result<Fields> {
        let mut trail = Trail::new(ctx.max_depth());
        self.with_related(item, ctx, &mut trail)
    }

    pub(crate) fn transform_guarded(
        &self,
        subject: Subject<'_>,
        ctx: &TransformContext<'_>,
        trail: &mut Trail,
    ) -> Result<Value> {
        let items = match subject {
            Subject::One(item) => return self.dispatch(item, ctx, trail).map(Value::Object),
            Subject::Many(items) => items,
            Subject::Page(page) => page.items(),
        };

        items
            .iter()
            .map(|item| self.dispatch(&**item, ctx, trail).map(Value::Object))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn dispatch(
        &self,
        item: &dyn Model,
        ctx: &TransformContext<'_>,
        trail: &mut Trail,
    ) -> Result<Fields> {
        if !self.related.is_empty() {
            return self.with_related(item, ctx, trail);
        }

        if self.active.is_some() {
            return self.alternate_transformation(item);
        }

        self.transformation(item)
    }

    fn with_related(
        &self,
        item: &dyn Model,
        ctx: &TransformContext<'_>,
        trail: &mut Trail,
    ) -> Result<Fields> {
        let mut fields = self.transformation(item)?;

        for path in &self.related {
            let value = self.related_transformation(item, path, ctx, trail)?;
            fields.insert(relation_key(path).to_string(), value);
        }

        Ok(fields)
    }

    /// Transform the data behind one relation path of `item`
    fn related_transformation(
        &self,
        item: &dyn Model,
        path: &str,
        ctx: &TransformContext<'_>,
        trail: &mut Trail,
    ) -> Result<Value> {
        let (relation, tail) = split_relation_path(path)?;

        trail.enter(item, relation)?;
        let result = self.resolve_related(item, relation, tail, ctx, trail);
        trail.leave();

        result
    }

    fn resolve_related(
        &self,
        item: &dyn Model,
        relation: &str,
        tail: Option<&str>,
        ctx: &TransformContext<'_>,
        trail: &mut Trail,
    ) -> Result<Value> {
        let related = item.relation(relation).ok_or_else(|| Error::UnknownRelation {
            model: item.model_name().to_string(),
            relation: relation.to_string(),
        })?;

        let (Some(representative), Some(subject)) = (related.representative(), related.subject())
        else {
            tracing::trace!(transformer = self.name(), relation, "relation is empty");
            return related.to_plain();
        };

        let Some(mut nested) = resolve::transformer_for(representative, ctx)? else {
            log::debug!(
                "No transformer for {} (relation '{}' of {}), using plain conversion",
                representative.model_name(),
                relation,
                item.model_name()
            );
            return related.to_plain();
        };

        if let Some(tail) = tail {
            nested.with(tail);
        }

        tracing::debug!(
            transformer = self.name(),
            relation,
            nested = nested.name(),
            depth = trail.depth(),
            "transforming related models"
        );

        nested.transform_guarded(subject, ctx, trail)
    }
}
