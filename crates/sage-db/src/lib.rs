//! # sage-db
//!
//! libSQL persistence and workflow engine for Sage.
//!
//! Handles all relational state: users, doubts, answers, practice answers,
//! subjects, and the audit trail. Workflow operations live on
//! [`service::SageService`], one repo module per component; every operation
//! that writes more than one row runs inside a single libSQL transaction.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod tx;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Sage state operations.
///
/// Wraps a libSQL database and its single connection.
pub struct SageDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SageDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let sage_db = Self { db, conn };
        sage_db.run_migrations().await?;
        Ok(sage_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"dbt-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        generate_id(&self.conn, prefix).await
    }
}

/// Generate a prefixed ID on any connection, including an open transaction.
///
/// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
pub(crate) async fn generate_id(
    conn: &libsql::Connection,
    prefix: &str,
) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
            (),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<String>(0)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Helper to create an in-memory database for testing.
    async fn test_db() -> SageDb {
        SageDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "users",
            "doubts",
            "answers",
            "practice_answers",
            "subjects",
            "audit_trail",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("dbt").await.unwrap();
        assert!(id.starts_with("dbt-"), "ID should start with 'dbt-': {id}");
        assert_eq!(
            id.len(),
            12,
            "ID should be 12 chars (3 prefix + 1 dash + 8 hex): {id}"
        );

        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in sage_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO doubts (id, user_id, question) VALUES ('dbt-t1', 'usr-missing', 'q')",
                (),
            )
            .await;
        assert!(result.is_err(), "doubt with unknown user should be rejected");
    }

    #[tokio::test]
    async fn status_check_constraint_rejects_unknown_values() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO users (id, name, email, role) VALUES ('usr-t1', 'Ada', 'ada@example.com', 'student')",
                (),
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO doubts (id, user_id, question, status) VALUES ('dbt-t1', 'usr-t1', 'q', 'closed')",
                (),
            )
            .await;
        assert!(result.is_err(), "unknown doubt status should be rejected");
    }

    #[tokio::test]
    async fn answers_allow_multiple_rows_per_doubt() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO users (id, name, email, role) VALUES ('usr-s', 'S', 's@example.com', 'student');
                 INSERT INTO users (id, name, email, role) VALUES ('usr-p', 'P', 'p@example.com', 'professor');
                 INSERT INTO doubts (id, user_id, question) VALUES ('dbt-1', 'usr-s', 'q');
                 INSERT INTO answers (id, doubt_id, answer_text, answered_by) VALUES ('ans-1', 'dbt-1', 'a', 'usr-p');
                 INSERT INTO answers (id, doubt_id, answer_text, answered_by) VALUES ('ans-2', 'dbt-1', 'b', 'usr-s');",
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM answers WHERE doubt_id = 'dbt-1'", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 2);
    }
}
