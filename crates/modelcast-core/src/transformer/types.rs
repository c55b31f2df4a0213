//! Core types for the transformer system
//!
//! Copyright (c) 2025 Modelcast Team
//! Licensed under the Apache-2.0 license

use crate::model::Model;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;

/// Conventional suffix accepted (and stripped) on transformation names
pub const TRANSFORMATION_SUFFIX: &str = "Transformation";

/// Name reported for the default transformation
pub const DEFAULT_TRANSFORMATION: &str = "default";

/// A registered transformation function over a type-erased model
pub type TransformFn = Arc<dyn Fn(&dyn Model) -> Result<Value> + Send + Sync>;

/// Strip the conventional `Transformation` suffix from a strategy name.
///
/// `"adminTransformation"` and `"admin"` both normalize to `"admin"`.
pub fn normalize_transformation_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_suffix(TRANSFORMATION_SUFFIX).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_suffix() {
        assert_eq!(normalize_transformation_name("adminTransformation"), "admin");
        assert_eq!(normalize_transformation_name("admin"), "admin");
        assert_eq!(normalize_transformation_name(" summary "), "summary");
    }

    #[test]
    fn test_normalize_bare_suffix_is_empty() {
        assert_eq!(normalize_transformation_name("Transformation"), "");
    }
}
