//! Read-only query views: student history, professor inbox and answers,
//! the review queue, the public archive, and the leaderboard.
//!
//! "Latest answer" always means the most recent answer row for a doubt,
//! with insertion order breaking timestamp ties.

use sage_core::entities::Doubt;
use sage_core::enums::{DoubtStatus, PracticeStatus, Role};
use sage_core::input::ArchiveFilter;
use sage_core::policy::LEADERBOARD_SIZE;
use sage_core::views::{
    ArchiveEntry, LeaderboardEntry, ProfessorAnswerView, ReviewQueueItem, StudentDoubtView,
};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_opt_u32, parse_datetime, qualify};
use crate::repos::answer::{self, answer_at};
use crate::repos::doubt::{self, row_to_doubt};
use crate::service::SageService;

/// Columns in the doubt projection before any joined columns start.
const DOUBT_WIDTH: i32 = 10;

const LATEST_ANSWER: &str = "(SELECT la.id FROM answers la WHERE la.doubt_id = d.id
      ORDER BY la.created_at DESC, la.rowid DESC LIMIT 1)";

impl SageService {
    /// A student's doubts, newest first, each with its latest answer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_student_doubts(
        &self,
        user_id: &str,
    ) -> Result<Vec<StudentDoubtView>, DatabaseError> {
        let sql = format!(
            "SELECT {}, {}
             FROM doubts d
             LEFT JOIN answers a ON a.id = {LATEST_ANSWER}
             WHERE d.user_id = ?1
             ORDER BY d.created_at DESC, d.rowid DESC",
            qualify(doubt::SELECT_COLS, "d"),
            qualify(answer::SELECT_COLS, "a"),
        );
        let mut rows = self.db().conn().query(&sql, [user_id]).await?;

        let mut views = Vec::new();
        while let Some(row) = rows.next().await? {
            let answer = match get_opt_string(&row, DOUBT_WIDTH)? {
                Some(_) => Some(answer_at(&row, DOUBT_WIDTH)?),
                None => None,
            };
            views.push(StudentDoubtView {
                doubt: row_to_doubt(&row)?,
                answer,
            });
        }
        Ok(views)
    }

    /// Unanswered doubts addressed to this professor or to nobody, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn professor_inbox(
        &self,
        professor_id: &str,
    ) -> Result<Vec<Doubt>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM doubts d
             WHERE (d.professor IS NULL OR d.professor = ?1)
               AND NOT EXISTS (SELECT 1 FROM answers a WHERE a.doubt_id = d.id)
             ORDER BY d.created_at DESC, d.rowid DESC",
            qualify(doubt::SELECT_COLS, "d"),
        );
        let mut rows = self.db().conn().query(&sql, [professor_id]).await?;

        let mut doubts = Vec::new();
        while let Some(row) = rows.next().await? {
            doubts.push(row_to_doubt(&row)?);
        }
        Ok(doubts)
    }

    /// Answers authored by a professor with their questions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_professor_answers(
        &self,
        professor_id: &str,
    ) -> Result<Vec<ProfessorAnswerView>, DatabaseError> {
        let sql = format!(
            "SELECT {}, d.question
             FROM answers a
             JOIN doubts d ON d.id = a.doubt_id
             WHERE a.answered_by = ?1
             ORDER BY a.created_at DESC, a.rowid DESC",
            qualify(answer::SELECT_COLS, "a"),
        );
        let mut rows = self.db().conn().query(&sql, [professor_id]).await?;

        let mut views = Vec::new();
        while let Some(row) = rows.next().await? {
            views.push(ProfessorAnswerView {
                answer: answer_at(&row, 0)?,
                question: row.get(5)?,
            });
        }
        Ok(views)
    }

    /// Pending practice answers with question and student name, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn review_queue(&self) -> Result<Vec<ReviewQueueItem>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT p.id, p.doubt_id, d.question, p.student_id, u.name, p.answer_text, p.created_at
                 FROM practice_answers p
                 JOIN doubts d ON d.id = p.doubt_id
                 JOIN users u ON u.id = p.student_id
                 WHERE p.status = ?1
                 ORDER BY p.created_at DESC, p.rowid DESC",
                [PracticeStatus::Pending.as_str()],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(ReviewQueueItem {
                practice_id: row.get(0)?,
                doubt_id: row.get(1)?,
                question: row.get(2)?,
                student_id: row.get(3)?,
                student_name: row.get(4)?,
                answer_text: row.get(5)?,
                submitted_at: parse_datetime(&row.get::<String>(6)?)?,
            });
        }
        Ok(items)
    }

    /// Answered doubts with their latest answer, newest answer first.
    ///
    /// `semester` and `course` match exactly; `search` is a case-insensitive
    /// substring of the question. Blank filters are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn archive(
        &self,
        filter: ArchiveFilter,
    ) -> Result<Vec<ArchiveEntry>, DatabaseError> {
        let filter = filter.normalized();
        let mut params: Vec<libsql::Value> =
            vec![libsql::Value::Text(DoubtStatus::Answered.as_str().to_string())];
        let mut conditions = vec!["d.status = ?1".to_string()];

        if let Some(semester) = filter.semester {
            params.push(libsql::Value::Integer(i64::from(semester)));
            conditions.push(format!("d.semester = ?{}", params.len()));
        }
        if let Some(course) = filter.course {
            params.push(libsql::Value::Text(course));
            conditions.push(format!("d.course = ?{}", params.len()));
        }
        if let Some(search) = filter.search {
            params.push(libsql::Value::Text(search));
            conditions.push(format!(
                "instr(lower(d.question), lower(?{})) > 0",
                params.len()
            ));
        }

        let sql = format!(
            "SELECT d.id, d.question, d.branch, d.semester, d.course,
                    a.id, a.answer_text, a.answered_by, u.name, a.created_at
             FROM doubts d
             JOIN answers a ON a.id = {LATEST_ANSWER}
             JOIN users u ON u.id = a.answered_by
             WHERE {}
             ORDER BY a.created_at DESC, a.rowid DESC",
            conditions.join(" AND "),
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(ArchiveEntry {
                doubt_id: row.get(0)?,
                question: row.get(1)?,
                branch: get_opt_string(&row, 2)?,
                semester: get_opt_u32(&row, 3)?,
                course: get_opt_string(&row, 4)?,
                answer_id: row.get(5)?,
                answer_text: row.get(6)?,
                answered_by: row.get(7)?,
                answered_by_name: row.get(8)?,
                answered_at: parse_datetime(&row.get::<String>(9)?)?,
            });
        }
        Ok(entries)
    }

    /// Top students by points, ties broken by name.
    ///
    /// `limit` defaults to the configured leaderboard size and never exceeds
    /// `LEADERBOARD_SIZE`; a caller may ask for fewer rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn leaderboard(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
        let limit = limit
            .unwrap_or(self.settings().leaderboard_size)
            .min(LEADERBOARD_SIZE);
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, points FROM users
                 WHERE role = ?1
                 ORDER BY points DESC, name ASC, rowid ASC
                 LIMIT ?2",
                libsql::params![Role::Student.as_str(), limit],
            )
            .await?;

        let mut entries = Vec::new();
        let mut rank = 0u32;
        while let Some(row) = rows.next().await? {
            rank += 1;
            entries.push(LeaderboardEntry {
                rank,
                user_id: row.get(0)?,
                name: row.get(1)?,
                points: row.get::<i64>(2)?,
            });
        }
        Ok(entries)
    }
}
