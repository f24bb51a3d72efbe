//! Audit trail repository.
//!
//! Append-only audit entries recording every workflow mutation. Entries are
//! written on the mutation's own transaction so they commit or roll back
//! with it.

use chrono::{DateTime, Utc};
use sage_core::entities::AuditEntry;
use sage_core::enums::{AuditAction, EntityType};
use sage_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::SageService;

const SELECT_COLS: &str = "id, entity_type, entity_id, action, actor_id, detail, created_at";

const DEFAULT_AUDIT_LIMIT: u32 = 100;

/// Filter criteria for audit queries.
#[derive(Debug, Default)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

/// What happened to which entity, before it gets an ID and a timestamp.
pub(crate) struct AuditEvent<'a> {
    pub entity_type: EntityType,
    pub entity_id: &'a str,
    pub action: AuditAction,
    pub actor_id: Option<&'a str>,
    pub detail: Option<serde_json::Value>,
}

/// Append an audit entry on `conn`, which is normally an open transaction.
pub(crate) async fn append_audit(
    conn: &libsql::Connection,
    event: AuditEvent<'_>,
    now: DateTime<Utc>,
) -> Result<AuditEntry, DatabaseError> {
    let id = generate_id(conn, PREFIX_AUDIT).await?;
    let detail = event.detail.as_ref().map(ToString::to_string);

    conn.execute(
        "INSERT INTO audit_trail (id, entity_type, entity_id, action, actor_id, detail, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            id.as_str(),
            event.entity_type.as_str(),
            event.entity_id,
            event.action.as_str(),
            event.actor_id,
            detail.as_deref(),
            now.to_rfc3339()
        ],
    )
    .await?;

    Ok(AuditEntry {
        id,
        entity_type: event.entity_type,
        entity_id: event.entity_id.to_string(),
        action: event.action,
        actor_id: event.actor_id.map(String::from),
        detail: event.detail,
        created_at: now,
    })
}

fn row_to_audit(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get::<String>(0)?,
        entity_type: parse_enum(&row.get::<String>(1)?)?,
        entity_id: row.get::<String>(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        actor_id: get_opt_string(row, 4)?,
        detail: parse_optional_json(get_opt_string(row, 5)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl SageService {
    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(et) = filter.entity_type {
            params.push(libsql::Value::Text(et.as_str().to_string()));
            conditions.push(format!("entity_type = ?{}", params.len()));
        }
        if let Some(ref eid) = filter.entity_id {
            params.push(libsql::Value::Text(eid.clone()));
            conditions.push(format!("entity_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_trail {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_doubt, seed_user, test_service};
    use pretty_assertions::assert_eq;
    use sage_core::enums::Role;

    #[tokio::test]
    async fn append_returns_persisted_entry() {
        let svc = test_service().await;
        let now = Utc::now();
        let entry = append_audit(
            svc.db().conn(),
            AuditEvent {
                entity_type: EntityType::Subject,
                entity_id: "sub-00000001",
                action: AuditAction::Created,
                actor_id: None,
                detail: Some(serde_json::json!({"name": "Compilers"})),
            },
            now,
        )
        .await
        .unwrap();

        assert!(entry.id.starts_with("aud-"));
        let stored = svc
            .query_audit(&AuditFilter {
                entity_id: Some("sub-00000001".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, entry.id);
        assert_eq!(stored[0].detail, entry.detail);
    }

    #[tokio::test]
    async fn filter_by_entity_type_and_action() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;
        seed_doubt(&svc, &student.id, "What is a B-tree?", None).await;

        let doubts_created = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::Doubt),
                action: Some(AuditAction::Created),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(doubts_created.len(), 1);
        assert_eq!(doubts_created[0].actor_id.as_deref(), Some(student.id.as_str()));

        let all = svc.query_audit(&AuditFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2, "user creation and doubt creation");
        assert_eq!(all[0].entity_type, EntityType::Doubt, "newest first");
    }

    #[tokio::test]
    async fn limit_caps_results() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;
        for i in 0..3 {
            seed_doubt(&svc, &student.id, &format!("question {i}"), None).await;
        }
        let entries = svc
            .query_audit(&AuditFilter {
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
    }
}
