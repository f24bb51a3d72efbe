use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An immutable answer resolving a doubt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Answer {
    pub id: String,
    pub doubt_id: String,
    pub answer_text: String,
    pub answered_by: String,
    pub created_at: DateTime<Utc>,
}
