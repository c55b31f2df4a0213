//! Booted transformation runtime
//!
//! Owns the container and registry built at startup and lends out
//! [`TransformContext`]s for transform calls.

use crate::config::AppConfig;
use crate::error::{Error, Result};
use modelcast_core::{
    transformer_for, Container, Model, Resolver, TransformContext, Transformer,
    TransformerDefinition, TransformerProvider, TransformerRegistry,
};
use std::sync::Arc;

/// Registered transformers plus the settings they run under
#[derive(Debug)]
pub struct Runtime {
    config: AppConfig,
    provider: TransformerProvider,
    container: Container,
}

impl Runtime {
    /// Register `definitions` against the configured registry.
    ///
    /// Fails if two definitions share a name or the registry names a
    /// transformer with no definition.
    pub fn boot<I, D>(config: AppConfig, definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<Arc<TransformerDefinition>>,
    {
        config.validate()?;

        let provider = TransformerProvider::new().definitions(definitions)?;
        let mut container = Container::new();
        let bound = provider.register(&config.transformers, &mut container)?;

        tracing::info!(
            transformers = bound,
            max_relation_depth = config.max_relation_depth,
            "Runtime booted"
        );

        Ok(Self {
            config,
            provider,
            container,
        })
    }

    /// Context for transform calls, carrying the configured depth limit
    pub fn context(&self) -> TransformContext<'_> {
        TransformContext::new(&self.container, &self.config.transformers)
            .with_max_depth(self.config.max_relation_depth)
    }

    /// The model to transformer registry
    pub fn registry(&self) -> &TransformerRegistry {
        &self.config.transformers
    }

    /// The loaded configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registered definitions
    pub fn provider(&self) -> &TransformerProvider {
        &self.provider
    }

    /// Container access for binding additional services
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Make a fresh transformer by type name
    pub fn transformer(&self, name: &str) -> Result<Transformer> {
        let instance = self.container.make(name)?;

        instance
            .downcast::<Transformer>()
            .map(|transformer| *transformer)
            .map_err(|_| Error::config(format!("'{}' is bound but is not a transformer", name)))
    }

    /// Transformer for a model, `None` if the model has none
    pub fn transformer_for(&self, model: &dyn Model) -> Result<Option<Transformer>> {
        Ok(transformer_for(model, &self.context())?)
    }
}
