//! Read projections returned by the query views and workflow receipts.
//!
//! These structs define the JSON shape of `sage` command output for the
//! history, inbox, review queue, archive, and leaderboard listings.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Answer, Doubt};
use crate::enums::PracticeStatus;

/// A student's doubt with its most recent resolving answer, if any.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudentDoubtView {
    pub doubt: Doubt,
    pub answer: Option<Answer>,
}

/// A professor-authored answer with the question it resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfessorAnswerView {
    pub answer: Answer,
    pub question: String,
}

/// One pending practice submission in the professor worklist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewQueueItem {
    pub practice_id: String,
    pub doubt_id: String,
    pub question: String,
    pub student_id: String,
    pub student_name: String,
    pub answer_text: String,
    pub submitted_at: DateTime<Utc>,
}

/// An answered doubt as shown in the public archive.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub doubt_id: String,
    pub question: String,
    pub branch: Option<String>,
    pub semester: Option<u32>,
    pub course: Option<String>,
    pub answer_id: String,
    pub answer_text: String,
    pub answered_by: String,
    pub answered_by_name: String,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub name: String,
    pub points: i64,
}

/// Result of reviewing a practice answer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewReceipt {
    pub practice_id: String,
    pub status: PracticeStatus,
    /// Points credited by this review; 0 when nothing was awarded.
    pub points_awarded: i64,
    /// ID of the answer created by publishing, when requested.
    pub published_answer_id: Option<String>,
}
