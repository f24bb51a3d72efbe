//! Cross-cutting error types for Sage.
//!
//! `CoreError` covers failures that can be detected without touching storage
//! (boundary validation, entity lookups). Storage errors live in
//! `sage-db`, which converts `CoreError` into its own `DatabaseError`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::EntityType;

/// Errors that can be raised by any Sage crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// Required input was missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a missing entity.
    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Classify this error for callers that translate failures into responses.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

/// Coarse failure classes surfaced to the routing layer.
///
/// `Validation` and `NotFound` are client-correctable; `Storage` is a
/// generic server failure. None of them are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(CoreError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(
            CoreError::not_found(EntityType::Doubt, "dbt-1").kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::not_found(EntityType::PracticeAnswer, "prc-deadbeef");
        assert_eq!(
            err.to_string(),
            "Entity not found: practice_answer prc-deadbeef"
        );
    }
}
