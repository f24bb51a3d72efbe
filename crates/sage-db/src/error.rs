//! Database error types for sage-db.

use sage_core::enums::EntityType;
use sage_core::errors::{CoreError, ErrorKind};
use thiserror::Error;

/// Errors from workflow operations and the storage underneath them.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Required input was missing or malformed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: EntityType, id: String },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Classify for the routing layer. Everything that is not a caller
    /// mistake is a storage failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::LibSql(_) => ErrorKind::Storage,
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_not_found_keeps_entity() {
        let err: DatabaseError = CoreError::not_found(EntityType::Doubt, "dbt-1").into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Entity not found: doubt dbt-1");
    }

    #[test]
    fn core_validation_keeps_its_kind() {
        let err: DatabaseError = CoreError::validation("question is required").into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Validation error: question is required");
    }

    #[test]
    fn storage_variants_classify_as_storage() {
        assert_eq!(DatabaseError::NoResult.kind(), ErrorKind::Storage);
        assert_eq!(
            DatabaseError::Query("bad".into()).kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            DatabaseError::not_found(EntityType::User, "usr-1").kind(),
            ErrorKind::NotFound
        );
    }
}
