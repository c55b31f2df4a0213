//! Relation paths and the recursion guard
//!
//! Copyright (c) 2025 Modelcast Team
//! Licensed under the Apache-2.0 license

use crate::model::{Identity, Model};
use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

static RELATION_PATH_REGEX: OnceLock<Regex> = OnceLock::new();

fn relation_path_regex() -> &'static Regex {
    RELATION_PATH_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .expect("relation path pattern is valid")
    })
}

/// Split a relation path into its head relation and the remaining tail.
///
/// Only one split happens per call; the tail is handed to the nested
/// transformer, which splits again.
pub fn split_relation_path(path: &str) -> Result<(&str, Option<&str>)> {
    if !relation_path_regex().is_match(path) {
        let reason = if path.is_empty() {
            "path is empty"
        } else if path.split('.').any(str::is_empty) {
            "path has an empty segment"
        } else {
            "segments must be identifiers"
        };
        return Err(Error::InvalidRelationPath {
            path: path.to_string(),
            reason: reason.to_string(),
        });
    }

    Ok(match path.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    })
}

/// The output key a relation path writes to: its first segment
pub fn relation_key(path: &str) -> &str {
    path.split_once('.').map_or(path, |(head, _)| head)
}

/// Relations entered along the current recursion path
#[derive(Debug)]
pub(crate) struct Trail {
    max_depth: usize,
    stack: Vec<(Identity, String)>,
}

impl Trail {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            stack: Vec::new(),
        }
    }

    /// Current nesting depth
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Record that `relation` of `item` is being transformed.
    ///
    /// Fails when the depth limit is reached or the same relation of the same
    /// object is already on the path.
    pub(crate) fn enter(&mut self, item: &dyn Model, relation: &str) -> Result<()> {
        if self.stack.len() >= self.max_depth {
            return Err(Error::RelationDepthExceeded {
                path: self.path_to(relation),
                max_depth: self.max_depth,
            });
        }

        let identity = Identity::of(item);
        if self
            .stack
            .iter()
            .any(|(seen, name)| seen == &identity && name == relation)
        {
            return Err(Error::RelationCycle {
                model: identity.to_string(),
                relation: relation.to_string(),
            });
        }

        self.stack.push((identity, relation.to_string()));
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.stack.pop();
    }

    fn path_to(&self, relation: &str) -> String {
        self.stack
            .iter()
            .map(|(_, name)| name.as_str())
            .chain(std::iter::once(relation))
            .collect::<Vec<_>>()
            .join(".")
    }
}
