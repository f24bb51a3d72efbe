//! Workflow policy constants.

/// Points granted to a student when a practice answer first becomes `correct`.
pub const PRACTICE_REWARD_POINTS: i64 = 100;

/// Number of students shown on the leaderboard.
pub const LEADERBOARD_SIZE: u32 = 5;
