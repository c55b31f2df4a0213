//! Transformer resolution
//!
//! Finds the transformer for a model, either from an association declared on
//! the model itself or from the registry, and makes it through the
//! resolution service.

use crate::context::TransformContext;
use crate::model::Model;
use crate::transformer::Transformer;
use crate::{Error, Result};

/// Capability of a model to hand out the transformer that knows how to
/// transform it
pub trait Transformable: Model {
    /// Object-local transformer type association; takes precedence over the
    /// registry
    fn transformer_type(&self) -> Option<&str> {
        None
    }

    /// Resolve this model's transformer
    fn get_transformer(&self, ctx: &TransformContext<'_>) -> Result<Transformer> {
        resolve_transformer(self.model_name(), self.transformer_type(), ctx)
    }
}

/// Resolve the transformer for a model.
///
/// A non-blank direct association wins; otherwise the registry entry for
/// `model_name` is used. With neither, the lookup fails with
/// [`Error::TransformerNotFound`].
pub fn resolve_transformer(
    model_name: &str,
    direct: Option<&str>,
    ctx: &TransformContext<'_>,
) -> Result<Transformer> {
    if let Some(type_name) = direct.filter(|name| !name.trim().is_empty()) {
        tracing::trace!(
            model = model_name,
            transformer = type_name,
            "using direct transformer association"
        );
        return make_transformer(type_name, model_name, ctx);
    }

    match ctx.registry().get(model_name) {
        Some(type_name) => {
            tracing::trace!(
                model = model_name,
                transformer = type_name,
                "using registered transformer"
            );
            make_transformer(type_name, model_name, ctx)
        }
        None => Err(Error::TransformerNotFound {
            model: model_name.to_string(),
        }),
    }
}

/// Make the registry's transformer for a model, `None` if it has no entry
pub fn make_registered(
    model_name: &str,
    ctx: &TransformContext<'_>,
) -> Result<Option<Transformer>> {
    ctx.registry()
        .get(model_name)
        .map(|type_name| make_transformer(type_name, model_name, ctx))
        .transpose()
}

/// Make a transformer by type name and check that it really is one
pub fn make_transformer(
    type_name: &str,
    model_name: &str,
    ctx: &TransformContext<'_>,
) -> Result<Transformer> {
    let instance = ctx.resolver().make(type_name)?;

    instance
        .downcast::<Transformer>()
        .map(|transformer| *transformer)
        .map_err(|_| Error::InvalidTransformer {
            type_name: type_name.to_string(),
            model: model_name.to_string(),
        })
}

/// Transformer for a related model, if one can be determined.
///
/// The registry is consulted first, then the model's own transformable
/// capability. `None` means the caller should fall back to the model's plain
/// conversion.
pub fn transformer_for(
    model: &dyn Model,
    ctx: &TransformContext<'_>,
) -> Result<Option<Transformer>> {
    if let Some(transformer) = make_registered(model.model_name(), ctx)? {
        return Ok(Some(transformer));
    }

    match model.as_transformable() {
        Some(transformable) => transformable.get_transformer(ctx).map(Some),
        None => Ok(None),
    }
}
