//! User repository: registration, lookup, and identity resolution.

use chrono::{DateTime, Utc};
use sage_core::entities::User;
use sage_core::enums::{AuditAction, EntityType, Role};
use sage_core::identity::Identity;
use sage_core::ids::PREFIX_USER;
use sage_core::input::{NewUser, UserDraft};

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{parse_datetime, parse_enum};
use crate::repos::audit::{AuditEvent, append_audit};
use crate::service::SageService;
use crate::tx::finish;

pub(crate) const SELECT_COLS: &str = "id, name, email, role, points, created_at";

pub(crate) fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        points: row.get::<i64>(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

pub(crate) async fn fetch_user(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Option<User>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

/// Load a user and check it holds `role`.
///
/// `NotFound` when the user is missing, `Validation` when the role differs.
pub(crate) async fn require_role(
    conn: &libsql::Connection,
    id: &str,
    role: Role,
) -> Result<User, DatabaseError> {
    let user = fetch_user(conn, id)
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::User, id))?;
    if user.role != role {
        return Err(DatabaseError::Validation(format!(
            "user {id} is a {}, expected a {role}",
            user.role
        )));
    }
    Ok(user)
}

async fn insert_user(
    conn: &libsql::Connection,
    new: &NewUser,
    now: DateTime<Utc>,
) -> Result<User, DatabaseError> {
    let id = generate_id(conn, PREFIX_USER).await?;
    conn.execute(
        "INSERT INTO users (id, name, email, role, points, created_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5)",
        libsql::params![
            id.as_str(),
            new.name.as_str(),
            new.email.as_str(),
            new.role.as_str(),
            now.to_rfc3339()
        ],
    )
    .await?;
    append_audit(
        conn,
        AuditEvent {
            entity_type: EntityType::User,
            entity_id: &id,
            action: AuditAction::Created,
            actor_id: None,
            detail: Some(serde_json::json!({ "role": new.role })),
        },
        now,
    )
    .await?;
    Ok(User {
        id,
        name: new.name.clone(),
        email: new.email.clone(),
        role: new.role,
        points: 0,
        created_at: now,
    })
}

impl SageService {
    /// Register a student or professor with zero points.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for absent fields or an unknown
    /// role; a duplicate email fails the unique constraint.
    pub async fn register_user(&self, draft: UserDraft) -> Result<User, DatabaseError> {
        let new = draft.validate()?;
        let now = Utc::now();

        let tx = self.begin().await?;
        let outcome = insert_user(&tx, &new, now).await;
        let user = finish(tx, outcome).await?;

        tracing::debug!(user_id = %user.id, role = %user.role, "registered user");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no user has this ID.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        fetch_user(self.db().conn(), id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::User, id))
    }

    /// Resolve a user ID into the identity callers branch on.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no user has this ID.
    pub async fn resolve_identity(&self, user_id: &str) -> Result<Identity, DatabaseError> {
        let user = self.get_user(user_id).await?;
        Ok(Identity {
            user_id: user.id,
            role: user.role,
        })
    }
}
