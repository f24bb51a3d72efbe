use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// Resolved caller identity handed to the workflow by the authentication layer.
///
/// Contains only data fields. Credential checks happen before one of these
/// is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn is_professor(&self) -> bool {
        matches!(self.role, Role::Professor)
    }
}
