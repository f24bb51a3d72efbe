use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reference data: a subject taught in a department for one semester.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub department_id: String,
    pub semester: u32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
