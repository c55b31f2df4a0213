//! Transform context carrying the engine's external collaborators
//!
//! Copyright (c) 2025 Modelcast Team
//! Licensed under the Apache-2.0 license

use crate::container::Resolver;
use crate::registry::TransformerRegistry;
use std::fmt;

/// Default maximum relation nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Context for resolving nested transformers
///
/// The TransformContext bundles the resolution service and the registry that
/// relation-aware transformation needs, plus the recursion limit. It is
/// borrowed for the duration of a transform call and passed down explicitly
/// to every nested transformer.
#[derive(Clone, Copy)]
pub struct TransformContext<'a> {
    /// Resolution service used to make transformer instances
    resolver: &'a dyn Resolver,

    /// Model to transformer mapping
    registry: &'a TransformerRegistry,

    /// Maximum number of nested relation levels
    max_depth: usize,
}

impl<'a> TransformContext<'a> {
    /// Create a new context with the default depth limit
    pub fn new(resolver: &'a dyn Resolver, registry: &'a TransformerRegistry) -> Self {
        Self {
            resolver,
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the maximum relation depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Get the resolution service
    pub fn resolver(&self) -> &'a dyn Resolver {
        self.resolver
    }

    /// Get the registry
    pub fn registry(&self) -> &'a TransformerRegistry {
        self.registry
    }

    /// Get the maximum relation depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl fmt::Debug for TransformContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformContext")
            .field("registry", self.registry)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}
