//! Practice review reward settings.

use sage_core::policy::PRACTICE_REWARD_POINTS;
use serde::{Deserialize, Serialize};

const fn default_correct_points() -> i64 {
    PRACTICE_REWARD_POINTS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewardsConfig {
    /// Points credited when a practice answer is first marked correct.
    #[serde(default = "default_correct_points")]
    pub correct_practice_points: i64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            correct_practice_points: default_correct_points(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reward_is_one_hundred() {
        assert_eq!(RewardsConfig::default().correct_practice_points, 100);
    }
}
