//! Subject reference data.

use chrono::{DateTime, Utc};
use sage_core::entities::Subject;
use sage_core::enums::{AuditAction, EntityType};
use sage_core::errors::CoreError;
use sage_core::ids::PREFIX_SUBJECT;
use sage_core::input::SubjectQuery;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::parse_datetime;
use crate::repos::audit::{AuditEvent, append_audit};
use crate::service::SageService;
use crate::tx::finish;

const SELECT_COLS: &str = "id, department_id, semester, name, created_at";

fn row_to_subject(row: &libsql::Row) -> Result<Subject, DatabaseError> {
    let semester = row.get::<i64>(2)?;
    Ok(Subject {
        id: row.get(0)?,
        department_id: row.get(1)?,
        semester: u32::try_from(semester)
            .map_err(|_| DatabaseError::Query(format!("semester out of range: {semester}")))?,
        name: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

async fn insert_subject(
    conn: &libsql::Connection,
    department_id: &str,
    semester: u32,
    name: &str,
    now: DateTime<Utc>,
) -> Result<Subject, DatabaseError> {
    let id = generate_id(conn, PREFIX_SUBJECT).await?;
    conn.execute(
        "INSERT INTO subjects (id, department_id, semester, name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![id.as_str(), department_id, semester, name, now.to_rfc3339()],
    )
    .await?;
    append_audit(
        conn,
        AuditEvent {
            entity_type: EntityType::Subject,
            entity_id: &id,
            action: AuditAction::Created,
            actor_id: None,
            detail: None,
        },
        now,
    )
    .await?;
    Ok(Subject {
        id,
        department_id: department_id.to_string(),
        semester,
        name: name.to_string(),
        created_at: now,
    })
}

impl SageService {
    /// Seed a subject for a department and semester.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank department or name; a duplicate
    /// `(department, semester, name)` fails the unique constraint.
    pub async fn add_subject(
        &self,
        department_id: &str,
        semester: u32,
        name: &str,
    ) -> Result<Subject, DatabaseError> {
        let department_id = department_id.trim();
        let name = name.trim();
        if department_id.is_empty() {
            return Err(CoreError::validation("department_id is required").into());
        }
        if name.is_empty() {
            return Err(CoreError::validation("name is required").into());
        }

        let now = Utc::now();
        let tx = self.begin().await?;
        let outcome = insert_subject(&tx, department_id, semester, name, now).await;
        let subject = finish(tx, outcome).await?;

        tracing::debug!(subject_id = %subject.id, department_id, semester, "added subject");
        Ok(subject)
    }

    /// Subjects for one department and semester, alphabetical by name.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if either parameter is absent.
    pub async fn subjects(&self, query: SubjectQuery) -> Result<Vec<Subject>, DatabaseError> {
        let (department_id, semester) = query.validate()?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM subjects
                     WHERE department_id = ?1 AND semester = ?2
                     ORDER BY name ASC"
                ),
                libsql::params![department_id.as_str(), semester],
            )
            .await?;

        let mut subjects = Vec::new();
        while let Some(row) = rows.next().await? {
            subjects.push(row_to_subject(&row)?);
        }
        Ok(subjects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use pretty_assertions::assert_eq;
    use sage_core::errors::ErrorKind;

    fn query(department: Option<&str>, semester: Option<u32>) -> SubjectQuery {
        SubjectQuery {
            department_id: department.map(String::from),
            semester,
        }
    }

    #[tokio::test]
    async fn subjects_sorted_and_scoped() {
        let svc = test_service().await;
        svc.add_subject("cse", 3, "Operating Systems").await.unwrap();
        svc.add_subject("cse", 3, "Algorithms").await.unwrap();
        svc.add_subject("cse", 4, "Compilers").await.unwrap();
        svc.add_subject("ece", 3, "Signals").await.unwrap();

        let names: Vec<_> = svc
            .subjects(query(Some("cse"), Some(3)))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Algorithms", "Operating Systems"]);
    }

    #[tokio::test]
    async fn subjects_require_both_params() {
        let svc = test_service().await;
        let err = svc.subjects(query(None, Some(3))).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = svc.subjects(query(Some("cse"), None)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn duplicate_subject_rejected() {
        let svc = test_service().await;
        svc.add_subject("cse", 3, "Algorithms").await.unwrap();
        let err = svc.add_subject("cse", 3, "Algorithms").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[tokio::test]
    async fn blank_name_rejected() {
        let svc = test_service().await;
        let err = svc.add_subject("cse", 3, "  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
