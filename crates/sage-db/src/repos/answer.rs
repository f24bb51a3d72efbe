//! Answer repository: recording answers and closing their doubts.

use chrono::{DateTime, Utc};
use sage_core::entities::Answer;
use sage_core::enums::{AuditAction, EntityType, Role};
use sage_core::ids::PREFIX_ANSWER;
use sage_core::input::{AnswerDraft, NewAnswer};

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::parse_datetime;
use crate::repos::audit::{AuditEvent, append_audit};
use crate::repos::doubt::mark_doubt_answered;
use crate::repos::user::require_role;
use crate::service::SageService;
use crate::tx::finish;

pub(crate) const SELECT_COLS: &str = "id, doubt_id, answer_text, answered_by, created_at";

/// Read an answer whose columns start at `base` in the row.
pub(crate) fn answer_at(row: &libsql::Row, base: i32) -> Result<Answer, DatabaseError> {
    Ok(Answer {
        id: row.get(base)?,
        doubt_id: row.get(base + 1)?,
        answer_text: row.get(base + 2)?,
        answered_by: row.get(base + 3)?,
        created_at: parse_datetime(&row.get::<String>(base + 4)?)?,
    })
}

/// Close a doubt and attach an answer to it.
///
/// The doubt is looked up first so a missing doubt fails before any insert.
/// `author` is who the answer is credited to; `actor` is who caused it.
pub(crate) async fn resolve_doubt(
    conn: &libsql::Connection,
    doubt_id: &str,
    answer_text: &str,
    author: &str,
    actor: &str,
    action: AuditAction,
    now: DateTime<Utc>,
) -> Result<Answer, DatabaseError> {
    mark_doubt_answered(conn, doubt_id, actor, now).await?;

    let id = generate_id(conn, PREFIX_ANSWER).await?;
    conn.execute(
        "INSERT INTO answers (id, doubt_id, answer_text, answered_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        libsql::params![id.as_str(), doubt_id, answer_text, author, now.to_rfc3339()],
    )
    .await?;

    append_audit(
        conn,
        AuditEvent {
            entity_type: EntityType::Answer,
            entity_id: &id,
            action,
            actor_id: Some(actor),
            detail: Some(serde_json::json!({
                "doubt_id": doubt_id,
                "answered_by": author,
            })),
        },
        now,
    )
    .await?;

    Ok(Answer {
        id,
        doubt_id: doubt_id.to_string(),
        answer_text: answer_text.to_string(),
        answered_by: author.to_string(),
        created_at: now,
    })
}

async fn apply_answer(
    conn: &libsql::Connection,
    new: &NewAnswer,
    now: DateTime<Utc>,
) -> Result<Answer, DatabaseError> {
    require_role(conn, &new.answered_by, Role::Professor).await?;
    resolve_doubt(
        conn,
        &new.doubt_id,
        &new.answer_text,
        &new.answered_by,
        &new.answered_by,
        AuditAction::Answered,
        now,
    )
    .await
}

impl SageService {
    /// Record a professor's answer and mark the doubt answered, atomically.
    ///
    /// Answering a doubt that is already answered adds a further answer.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is absent or `answered_by` is not a professor.
    /// - `NotFound` if the doubt or the answering user does not exist.
    pub async fn record_answer(&self, draft: AnswerDraft) -> Result<Answer, DatabaseError> {
        let new = draft.validate()?;
        let now = Utc::now();

        let tx = self.begin().await?;
        let outcome = apply_answer(&tx, &new, now).await;
        let answer = finish(tx, outcome).await?;

        tracing::debug!(
            answer_id = %answer.id,
            doubt_id = %answer.doubt_id,
            answered_by = %answer.answered_by,
            "recorded answer"
        );
        Ok(answer)
    }

    /// All answers for one doubt, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn answers_for_doubt(&self, doubt_id: &str) -> Result<Vec<Answer>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM answers WHERE doubt_id = ?1
                     ORDER BY created_at ASC, rowid ASC"
                ),
                [doubt_id],
            )
            .await?;
        let mut answers = Vec::new();
        while let Some(row) = rows.next().await? {
            answers.push(answer_at(&row, 0)?);
        }
        Ok(answers)
    }
}
