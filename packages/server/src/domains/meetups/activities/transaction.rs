//! One atomic unit per mutation.
//!
//! Work runs against `&mut PgConnection` borrowed from the transaction and
//! hands its result to [`finish`], which commits on success and rolls back
//! on failure. A failed rollback is chained onto the original error instead
//! of replacing it.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, error};

use crate::common::{Result, StageExt, StoreError};

pub async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>> {
    pool.begin().await.stage("begin transaction")
}

pub async fn finish<T>(tx: Transaction<'_, Postgres>, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await.stage("commit transaction")?;
            Ok(value)
        }
        Err(err) => match tx.rollback().await {
            Ok(()) => {
                debug!(error = %err, "transaction rolled back");
                Err(err)
            }
            Err(rollback) => {
                error!(error = %err, rollback_error = %rollback, "transaction rollback failed");
                Err(StoreError::RollbackFailed {
                    original: Box::new(err),
                    rollback,
                }
                .into())
            }
        },
    }
}
