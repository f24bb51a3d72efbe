use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DoubtStatus;

/// A question raised by a student.
///
/// `professor` is `None` when the doubt is open to any professor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Doubt {
    pub id: String,
    pub user_id: String,
    pub question: String,
    pub branch: Option<String>,
    pub semester: Option<u32>,
    pub course: Option<String>,
    pub professor: Option<String>,
    pub status: DoubtStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
