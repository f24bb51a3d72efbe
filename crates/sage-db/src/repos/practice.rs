//! Practice answer repository: submission and the review transaction.
//!
//! A review updates the practice row, may credit the student's points, and
//! may publish the practice text as a public answer. All of that happens in
//! one transaction.

use chrono::{DateTime, Utc};
use sage_core::entities::PracticeAnswer;
use sage_core::enums::{AuditAction, EntityType, PracticeStatus, ReviewOutcome, Role};
use sage_core::ids::PREFIX_PRACTICE;
use sage_core::input::{NewPractice, PracticeDraft, Review, ReviewDraft};
use sage_core::views::ReviewReceipt;

use crate::error::DatabaseError;
use crate::generate_id;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_datetime};
use crate::repos::answer::resolve_doubt;
use crate::repos::audit::{AuditEvent, append_audit};
use crate::repos::doubt::fetch_doubt;
use crate::repos::user::require_role;
use crate::service::SageService;
use crate::tx::finish;

const SELECT_COLS: &str =
    "id, doubt_id, student_id, answer_text, status, reviewed_by, reviewed_at, created_at";

fn row_to_practice(row: &libsql::Row) -> Result<PracticeAnswer, DatabaseError> {
    Ok(PracticeAnswer {
        id: row.get(0)?,
        doubt_id: row.get(1)?,
        student_id: row.get(2)?,
        answer_text: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        reviewed_by: get_opt_string(row, 5)?,
        reviewed_at: parse_optional_datetime(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

async fn fetch_practice(
    conn: &libsql::Connection,
    id: &str,
) -> Result<Option<PracticeAnswer>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM practice_answers WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_practice(&row)?)),
        None => Ok(None),
    }
}

async fn insert_practice(
    conn: &libsql::Connection,
    new: NewPractice,
    now: DateTime<Utc>,
) -> Result<PracticeAnswer, DatabaseError> {
    if fetch_doubt(conn, &new.doubt_id).await?.is_none() {
        return Err(DatabaseError::not_found(EntityType::Doubt, &new.doubt_id));
    }
    require_role(conn, &new.student_id, Role::Student).await?;

    let id = generate_id(conn, PREFIX_PRACTICE).await?;
    conn.execute(
        "INSERT INTO practice_answers (id, doubt_id, student_id, answer_text, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        libsql::params![
            id.as_str(),
            new.doubt_id.as_str(),
            new.student_id.as_str(),
            new.answer_text.as_str(),
            PracticeStatus::Pending.as_str(),
            now.to_rfc3339()
        ],
    )
    .await?;

    append_audit(
        conn,
        AuditEvent {
            entity_type: EntityType::PracticeAnswer,
            entity_id: &id,
            action: AuditAction::Created,
            actor_id: Some(&new.student_id),
            detail: Some(serde_json::json!({ "doubt_id": new.doubt_id })),
        },
        now,
    )
    .await?;

    Ok(PracticeAnswer {
        id,
        doubt_id: new.doubt_id,
        student_id: new.student_id,
        answer_text: new.answer_text,
        status: PracticeStatus::Pending,
        reviewed_by: None,
        reviewed_at: None,
        created_at: now,
    })
}

/// Credit `points` to a student. The row must exist.
async fn award_points(
    conn: &libsql::Connection,
    student_id: &str,
    points: i64,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE users SET points = points + ?1 WHERE id = ?2",
            libsql::params![points, student_id],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::not_found(EntityType::User, student_id));
    }
    Ok(())
}

async fn apply_review(
    conn: &libsql::Connection,
    review: &Review,
    reward: i64,
    now: DateTime<Utc>,
) -> Result<ReviewReceipt, DatabaseError> {
    let practice = fetch_practice(conn, &review.practice_id)
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::PracticeAnswer, &review.practice_id))?;
    require_role(conn, &review.reviewer_id, Role::Professor).await?;

    let prior = practice.status;
    let next = review.outcome.status();
    if !prior.can_transition_to(next) {
        tracing::warn!(
            practice_id = %practice.id,
            from = %prior,
            to = %next,
            "practice answer already reviewed; re-applying review"
        );
    }

    conn.execute(
        "UPDATE practice_answers SET status = ?1, reviewed_by = ?2, reviewed_at = ?3 WHERE id = ?4",
        libsql::params![
            next.as_str(),
            review.reviewer_id.as_str(),
            now.to_rfc3339(),
            practice.id.as_str()
        ],
    )
    .await?;
    append_audit(
        conn,
        AuditEvent {
            entity_type: EntityType::PracticeAnswer,
            entity_id: &practice.id,
            action: AuditAction::StatusChanged,
            actor_id: Some(&review.reviewer_id),
            detail: Some(serde_json::json!({ "from": prior, "to": next })),
        },
        now,
    )
    .await?;

    // Never double-award a submission that was already correct.
    let points_awarded = if review.outcome == ReviewOutcome::Correct
        && prior != PracticeStatus::Correct
    {
        award_points(conn, &practice.student_id, reward).await?;
        append_audit(
            conn,
            AuditEvent {
                entity_type: EntityType::User,
                entity_id: &practice.student_id,
                action: AuditAction::PointsAwarded,
                actor_id: Some(&review.reviewer_id),
                detail: Some(serde_json::json!({
                    "points": reward,
                    "practice_id": practice.id,
                })),
            },
            now,
        )
        .await?;
        reward
    } else {
        0
    };

    let published_answer_id = if review.publish {
        let answer = resolve_doubt(
            conn,
            &practice.doubt_id,
            &practice.answer_text,
            &practice.student_id,
            &review.reviewer_id,
            AuditAction::Published,
            now,
        )
        .await?;
        Some(answer.id)
    } else {
        None
    };

    Ok(ReviewReceipt {
        practice_id: practice.id,
        status: next,
        points_awarded,
        published_answer_id,
    })
}

impl SageService {
    /// Submit a student's practice answer to an existing doubt.
    ///
    /// Accepted whatever the doubt's status; the new row is `pending`.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is absent or the submitter is not a student.
    /// - `NotFound` if the doubt or the student does not exist.
    pub async fn submit_practice(
        &self,
        draft: PracticeDraft,
    ) -> Result<PracticeAnswer, DatabaseError> {
        let new = draft.validate()?;
        let now = Utc::now();

        let tx = self.begin().await?;
        let outcome = insert_practice(&tx, new, now).await;
        let practice = finish(tx, outcome).await?;

        tracing::debug!(
            practice_id = %practice.id,
            doubt_id = %practice.doubt_id,
            student_id = %practice.student_id,
            "submitted practice answer"
        );
        Ok(practice)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no practice answer has this ID.
    pub async fn get_practice(&self, id: &str) -> Result<PracticeAnswer, DatabaseError> {
        fetch_practice(self.db().conn(), id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::PracticeAnswer, id))
    }

    /// Review a practice answer.
    ///
    /// Sets the verdict and reviewer, credits the configured reward the
    /// first time a submission becomes `correct`, and with `publish` turns
    /// the practice text into an answer credited to the student. Any failure
    /// rolls back every one of those writes.
    ///
    /// # Errors
    ///
    /// - `Validation` if a field is absent, the outcome is unknown, or the
    ///   reviewer is not a professor.
    /// - `NotFound` if the practice answer or the reviewer does not exist.
    pub async fn review_practice(
        &self,
        draft: ReviewDraft,
    ) -> Result<ReviewReceipt, DatabaseError> {
        let review = draft.validate()?;
        let now = Utc::now();

        let tx = self.begin().await?;
        let outcome = apply_review(&tx, &review, self.settings().practice_reward, now).await;
        let receipt = finish(tx, outcome).await?;

        tracing::debug!(
            practice_id = %receipt.practice_id,
            status = %receipt.status,
            points_awarded = receipt.points_awarded,
            published_answer_id = ?receipt.published_answer_id,
            "reviewed practice answer"
        );
        Ok(receipt)
    }
}
