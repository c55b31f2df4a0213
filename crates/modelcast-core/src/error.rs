//! Error types for the Modelcast core library
//!
//! This module defines the error handling system for the transformation engine,
//! using thiserror for the error enum and anyhow to carry causes reported by
//! the host's resolution service.

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Main error type for Modelcast operations
#[derive(Error, Debug)]
pub enum Error {
    /// A transformable model has neither a direct association nor a registry entry
    #[error(
        "Transformer definition not found for model '{model}': \
         set a transformer association or add it to the registry"
    )]
    TransformerNotFound {
        model: String,
    },

    /// The resolution service produced something that is not a transformer
    #[error("Resolved type '{type_name}' for model '{model}' is not a transformer")]
    InvalidTransformer {
        type_name: String,
        model: String,
    },

    /// No alternate transformation with that name on the transformer
    #[error("No such transformation as '{name}' defined on {transformer}")]
    UnknownTransformation {
        transformer: String,
        name: String,
    },

    /// The resolution service failed to produce an instance
    #[error("Failed to resolve '{type_name}': {source}")]
    Resolution {
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Relation recursion went deeper than the configured limit
    #[error("Relation depth exceeded at '{path}' (max depth: {max_depth})")]
    RelationDepthExceeded {
        path: String,
        max_depth: usize,
    },

    /// The same relation of the same object was reached twice on one path
    #[error("Relation cycle detected: '{relation}' of {model} is already being transformed")]
    RelationCycle {
        model: String,
        relation: String,
    },

    /// The model does not define the requested relation
    #[error("Model '{model}' has no relation named '{relation}'")]
    UnknownRelation {
        model: String,
        relation: String,
    },

    /// A relation path is not a dot-separated list of identifiers
    #[error("Invalid relation path '{path}': {reason}")]
    InvalidRelationPath {
        path: String,
        reason: String,
    },

    /// A transformation was handed a model of the wrong type
    #[error("Transformer {transformer} expected a {expected} but got {found}")]
    ModelMismatch {
        transformer: String,
        expected: String,
        found: String,
    },

    /// A transformation returned something other than a JSON object
    #[error(
        "Transformation '{transformation}' of {transformer} returned {kind}, expected an object"
    )]
    MalformedOutput {
        transformer: String,
        transformation: String,
        kind: ValueKind,
    },

    /// Invalid transformer or registry configuration
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON serialization errors, mainly from `fields_of`
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Shape of a JSON value, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ValueKind::Null,
            serde_json::Value::Bool(_) => ValueKind::Boolean,
            serde_json::Value::Number(_) => ValueKind::Number,
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Array(_) => ValueKind::Array,
            serde_json::Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Boolean => write!(f, "a boolean"),
            ValueKind::Number => write!(f, "a number"),
            ValueKind::String => write!(f, "a string"),
            ValueKind::Array => write!(f, "an array"),
            ValueKind::Object => write!(f, "an object"),
        }
    }
}

impl Error {
    /// Create a configuration error without a source
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error comes from the recursion guard
    pub fn is_recursion_guard(&self) -> bool {
        matches!(
            self,
            Error::RelationDepthExceeded { .. } | Error::RelationCycle { .. }
        )
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownTransformation {
            transformer: "UserTransformer".to_string(),
            name: "missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No such transformation as 'missing' defined on UserTransformer"
        );
    }

    #[test]
    fn test_resolution_keeps_source() {
        let err = Error::Resolution {
            type_name: "PostTransformer".to_string(),
            source: anyhow::anyhow!("no binding"),
        };
        assert!(err.to_string().contains("no binding"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_recursion_guard_classification() {
        let depth = Error::RelationDepthExceeded {
            path: "a.b".to_string(),
            max_depth: 1,
        };
        let cycle = Error::RelationCycle {
            model: "User".to_string(),
            relation: "posts".to_string(),
        };
        assert!(depth.is_recursion_guard());
        assert!(cycle.is_recursion_guard());
        assert!(!Error::configuration("x").is_recursion_guard());
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
        assert_eq!(ValueKind::Null.to_string(), "null");
    }
}
