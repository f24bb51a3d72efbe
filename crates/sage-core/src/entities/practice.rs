use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PracticeStatus;

/// A student's own attempt at answering an existing doubt.
///
/// `reviewed_by` and `reviewed_at` are set together by the review step.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PracticeAnswer {
    pub id: String,
    pub doubt_id: String,
    pub student_id: String,
    pub answer_text: String,
    pub status: PracticeStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
