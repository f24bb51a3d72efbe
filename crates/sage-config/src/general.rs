//! General application configuration.

use sage_core::policy::LEADERBOARD_SIZE;
use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

const fn default_leaderboard_size() -> u32 {
    LEADERBOARD_SIZE
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Number of students shown by `sage leaderboard`.
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}
