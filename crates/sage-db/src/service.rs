//! Service layer orchestrating workflow mutations with their audit entries.
//!
//! `SageService` wraps `SageDb` (raw database access) and the workflow
//! settings resolved from configuration. All repo methods are implemented as
//! `impl SageService`.

use sage_config::SageConfig;
use sage_core::policy::{LEADERBOARD_SIZE, PRACTICE_REWARD_POINTS};

use crate::SageDb;
use crate::error::DatabaseError;

/// Tunable workflow numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Points credited when a practice answer first becomes `correct`.
    pub practice_reward: i64,
    /// Default number of leaderboard rows, capped at `LEADERBOARD_SIZE`.
    pub leaderboard_size: u32,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            practice_reward: PRACTICE_REWARD_POINTS,
            leaderboard_size: LEADERBOARD_SIZE,
        }
    }
}

impl From<&SageConfig> for WorkflowSettings {
    fn from(config: &SageConfig) -> Self {
        Self {
            practice_reward: config.rewards.correct_practice_points,
            leaderboard_size: config.general.leaderboard_size,
        }
    }
}

/// Orchestrates workflow mutations with the audit trail.
///
/// Every mutation method follows this protocol:
/// 1. Begin transaction
/// 2. Execute SQL
/// 3. Append audit entries (inside transaction)
/// 4. Commit, or roll back every statement on the first failure
pub struct SageService {
    db: SageDb,
    settings: WorkflowSettings,
}

impl SageService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `settings` - Reward and leaderboard numbers.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        settings: WorkflowSettings,
    ) -> Result<Self, DatabaseError> {
        let db = SageDb::open_local(db_path).await?;
        tracing::debug!(db_path, "opened sage database");
        Ok(Self { db, settings })
    }

    /// Create from an existing `SageDb` (for testing).
    #[must_use]
    pub const fn from_db(db: SageDb, settings: WorkflowSettings) -> Self {
        Self { db, settings }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SageDb {
        &self.db
    }

    /// Reward and leaderboard numbers this service was built with.
    #[must_use]
    pub const fn settings(&self) -> WorkflowSettings {
        self.settings
    }

    /// Open a transaction on the service connection.
    pub(crate) async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.db.conn().transaction().await?)
    }
}
