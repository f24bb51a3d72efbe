//! Doubt repository: submission and the pending → answered transition.

use chrono::{DateTime, Utc};
use sage_core::entities::Doubt;
use sage_core::enums::{AuditAction, DoubtStatus, EntityType, Role};
use sage_core::ids::PREFIX_DOUBT;
use sage_core::input::{DoubtDraft, NewDoubt, ProfessorAssignment};

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{get_opt_string, get_opt_u32, parse_datetime, parse_enum};
use crate::repos::audit::{AuditEvent, append_audit};
use crate::repos::user::require_role;
use crate::service::SageService;
use crate::tx::finish;

pub(crate) const SELECT_COLS: &str =
    "id, user_id, question, branch, semester, course, professor, status, created_at, updated_at";

pub(crate) fn row_to_doubt(row: &libsql::Row) -> Result<Doubt, DatabaseError> {
    Ok(Doubt {
        id: row.get(0)?,
        user_id: row.get(1)?,
        question: row.get(2)?,
        branch: get_opt_string(row, 3)?,
        semester: get_opt_u32(row, 4)?,
        course: get_opt_string(row, 5)?,
        professor: get_opt_string(row, 6)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Resolve an assigned professor. Any failure to find a professor-role user
/// is a validation problem with the submission, not a missing resource.
async fn check_assignment(
    conn: &libsql::Connection,
    assignment: &ProfessorAssignment,
) -> Result<(), DatabaseError> {
    let Some(professor_id) = assignment.professor_id() else {
        return Ok(());
    };
    match require_role(conn, professor_id, Role::Professor).await {
        Ok(_) => Ok(()),
        Err(DatabaseError::NotFound { .. }) => Err(DatabaseError::Validation(format!(
            "assigned professor {professor_id} does not exist"
        ))),
        Err(e) => Err(e),
    }
}

async fn insert_doubt(
    conn: &libsql::Connection,
    new: NewDoubt,
    now: DateTime<Utc>,
) -> Result<Doubt, DatabaseError> {
    require_role(conn, &new.user_id, Role::Student).await?;
    check_assignment(conn, &new.professor).await?;

    let id = generate_id(conn, PREFIX_DOUBT).await?;
    let professor = new.professor.professor_id().map(String::from);
    conn.execute(
        "INSERT INTO doubts (id, user_id, question, branch, semester, course, professor, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        libsql::params![
            id.as_str(),
            new.user_id.as_str(),
            new.question.as_str(),
            new.branch.as_deref(),
            new.semester,
            new.course.as_deref(),
            professor.as_deref(),
            DoubtStatus::Pending.as_str(),
            now.to_rfc3339(),
            now.to_rfc3339()
        ],
    )
    .await?;

    append_audit(
        conn,
        AuditEvent {
            entity_type: EntityType::Doubt,
            entity_id: &id,
            action: AuditAction::Created,
            actor_id: Some(&new.user_id),
            detail: professor
                .as_ref()
                .map(|p| serde_json::json!({ "professor": p })),
        },
        now,
    )
    .await?;

    Ok(Doubt {
        id,
        user_id: new.user_id,
        question: new.question,
        branch: new.branch,
        semester: new.semester,
        course: new.course,
        professor,
        status: DoubtStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

/// Move a doubt to `answered`, shared by direct answers and publishing.
///
/// An already answered doubt stays answered and is left untouched. Returns
/// the status the doubt had before this call.
pub(crate) async fn mark_doubt_answered(
    conn: &libsql::Connection,
    doubt_id: &str,
    actor_id: &str,
    now: DateTime<Utc>,
) -> Result<DoubtStatus, DatabaseError> {
    let mut rows = conn
        .query("SELECT status FROM doubts WHERE id = ?1", [doubt_id])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::Doubt, doubt_id))?;
    let prior: DoubtStatus = parse_enum(&row.get::<String>(0)?)?;

    if !prior.can_transition_to(DoubtStatus::Answered) {
        tracing::warn!(doubt_id, status = %prior, "doubt already answered; adding another answer");
        return Ok(prior);
    }

    let changed = conn
        .execute(
            "UPDATE doubts SET status = ?1, updated_at = ?2 WHERE id = ?3",
            libsql::params![DoubtStatus::Answered.as_str(), now.to_rfc3339(), doubt_id],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::not_found(EntityType::Doubt, doubt_id));
    }

    append_audit(
        conn,
        AuditEvent {
            entity_type: EntityType::Doubt,
            entity_id: doubt_id,
            action: AuditAction::StatusChanged,
            actor_id: Some(actor_id),
            detail: Some(serde_json::json!({
                "from": prior,
                "to": DoubtStatus::Answered,
            })),
        },
        now,
    )
    .await?;
    Ok(prior)
}

pub(crate) async fn fetch_doubt(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Option<Doubt>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {SELECT_COLS} FROM doubts WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_doubt(&row)?)),
        None => Ok(None),
    }
}

impl SageService {
    /// Submit a new doubt as a student.
    ///
    /// The doubt starts `pending`. With no professor it is open to every
    /// professor's inbox.
    ///
    /// # Errors
    ///
    /// - `Validation` if `user_id` or `question` is absent, the submitter is
    ///   not a student, or the assigned professor is unknown.
    /// - `NotFound` if the submitting user does not exist.
    pub async fn submit_doubt(&self, draft: DoubtDraft) -> Result<Doubt, DatabaseError> {
        let new = draft.validate()?;
        let now = Utc::now();

        let tx = self.begin().await?;
        let outcome = insert_doubt(&tx, new, now).await;
        let doubt = finish(tx, outcome).await?;

        tracing::debug!(
            doubt_id = %doubt.id,
            user_id = %doubt.user_id,
            professor = ?doubt.professor,
            "submitted doubt"
        );
        Ok(doubt)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no doubt has this ID.
    pub async fn get_doubt(&self, id: &str) -> Result<Doubt, DatabaseError> {
        fetch_doubt(self.db().conn(), id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Doubt, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::{seed_doubt, seed_user, test_service};
    use pretty_assertions::assert_eq;
    use sage_core::errors::ErrorKind;

    fn draft(user_id: &str, question: &str, professor: Option<&str>) -> DoubtDraft {
        DoubtDraft {
            user_id: Some(user_id.into()),
            question: Some(question.into()),
            professor: professor.map(String::from),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn submit_doubt_unassigned() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;

        let doubt = svc
            .submit_doubt(DoubtDraft {
                semester: Some(4),
                course: Some("Operating Systems".into()),
                branch: Some("CSE".into()),
                ..draft(&student.id, "What is a page fault?", Some("  "))
            })
            .await
            .unwrap();

        assert!(doubt.id.starts_with("dbt-"));
        assert_eq!(doubt.status, DoubtStatus::Pending);
        assert_eq!(doubt.professor, None);

        let stored = svc.get_doubt(&doubt.id).await.unwrap();
        assert_eq!(stored, doubt);
    }

    #[tokio::test]
    async fn submit_doubt_assigned() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;
        let prof = seed_user(&svc, "Meera", Role::Professor).await;

        let doubt = svc
            .submit_doubt(draft(&student.id, "Why LRU?", Some(&prof.id)))
            .await
            .unwrap();
        assert_eq!(doubt.professor.as_deref(), Some(prof.id.as_str()));
    }

    #[tokio::test]
    async fn submit_doubt_rejects_unknown_professor() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;

        let err = svc
            .submit_doubt(draft(&student.id, "q", Some("usr-ffffffff")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn submit_doubt_rejects_student_as_professor() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;
        let other = seed_user(&svc, "Anu", Role::Student).await;

        let err = svc
            .submit_doubt(draft(&student.id, "q", Some(&other.id)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn submit_doubt_unknown_user_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .submit_doubt(draft("usr-00000000", "q", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn submit_doubt_missing_question_is_validation() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;
        let err = svc
            .submit_doubt(draft(&student.id, "   ", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn get_doubt_missing_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_doubt("dbt-00000000").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn mark_answered_transitions_once() {
        let svc = test_service().await;
        let student = seed_user(&svc, "Ravi", Role::Student).await;
        let prof = seed_user(&svc, "Meera", Role::Professor).await;
        let doubt = seed_doubt(&svc, &student.id, "q", None).await;

        let first = mark_doubt_answered(svc.db().conn(), &doubt.id, &prof.id, Utc::now())
            .await
            .unwrap();
        assert_eq!(first, DoubtStatus::Pending);
        let second = mark_doubt_answered(svc.db().conn(), &doubt.id, &prof.id, Utc::now())
            .await
            .unwrap();
        assert_eq!(second, DoubtStatus::Answered);

        assert_eq!(
            svc.get_doubt(&doubt.id).await.unwrap().status,
            DoubtStatus::Answered
        );
        let changes = svc
            .query_audit(&AuditFilter {
                entity_id: Some(doubt.id.clone()),
                action: Some(AuditAction::StatusChanged),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(changes.len(), 1, "second call must not log a transition");
    }

    #[tokio::test]
    async fn mark_answered_missing_doubt() {
        let svc = test_service().await;
        let err = mark_doubt_answered(svc.db().conn(), "dbt-00000000", "usr-x", Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
