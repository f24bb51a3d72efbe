//! libSQL database location.

use serde::{Deserialize, Serialize};

/// Path used by in-process test databases.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    ".sage/sage.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }
}
