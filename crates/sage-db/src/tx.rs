//! Transaction completion.
//!
//! Multi-write operations open a transaction, run their statements against
//! it, and hand the outcome to [`finish`]. A successful outcome commits; a
//! failed one rolls back every statement before the error is returned.

use crate::error::DatabaseError;

/// Commit on `Ok`, roll back on `Err`.
///
/// If the rollback itself fails, the original error is still returned and
/// the rollback failure is logged.
///
/// # Errors
///
/// Returns the outcome's error, or a `DatabaseError` if the commit fails.
pub async fn finish<T>(
    tx: libsql::Transaction,
    outcome: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::error!(%error, %rollback_error, "transaction rollback failed");
            }
            Err(error)
        }
    }
}
