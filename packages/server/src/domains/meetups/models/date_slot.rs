use serde::Serialize;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::common::{DateSlotId, EventId, NotFound, Result, StageExt};

/// DateSlot - one candidate date of an event, as epoch milliseconds (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DateSlot {
    #[serde(skip)]
    pub id: DateSlotId,
    #[serde(skip)]
    pub event_id: EventId,
    pub timestamp_ms: i64,
}

impl DateSlot {
    pub async fn create<'e>(
        event_id: EventId,
        timestamp_ms: i64,
        executor: impl PgExecutor<'e>,
    ) -> Result<DateSlotId> {
        sqlx::query_scalar::<_, DateSlotId>(
            r#"
            INSERT INTO date_slots (event_id, timestamp_ms)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(event_id)
        .bind(timestamp_ms)
        .fetch_one(executor)
        .await
        .stage("insert date slot")
    }

    pub async fn find_by_id<'e>(id: DateSlotId, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM date_slots WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .stage("select date slot")?
            .ok_or_else(|| {
                NotFound::Row {
                    entity: "date slot",
                    id: id.into_uuid(),
                }
                .into()
            })
    }

    /// All slots of an event, earliest first.
    pub async fn find_for_event<'e>(
        event_id: EventId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM date_slots WHERE event_id = $1 ORDER BY timestamp_ms ASC",
        )
        .bind(event_id)
        .fetch_all(executor)
        .await
        .stage("select date slots for event")
    }

    pub async fn update<'e>(
        id: DateSlotId,
        timestamp_ms: i64,
        executor: impl PgExecutor<'e>,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE date_slots SET timestamp_ms = $2 WHERE id = $1")
            .bind(id)
            .bind(timestamp_ms)
            .execute(executor)
            .await
            .stage("update date slot")?;

        if result.rows_affected() == 0 {
            return Err(NotFound::Row {
                entity: "date slot",
                id: id.into_uuid(),
            }
            .into());
        }
        Ok(())
    }

    /// Idempotent. Responses for the slot are removed by cascade.
    pub async fn delete<'e>(id: DateSlotId, executor: impl PgExecutor<'e>) -> Result<()> {
        sqlx::query("DELETE FROM date_slots WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .stage("delete date slot")?;
        Ok(())
    }

    /// Counts how many of `ids` still exist. Used to confirm deletes landed.
    pub async fn count_by_ids<'e>(ids: &[DateSlotId], executor: impl PgExecutor<'e>) -> Result<i64> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM date_slots WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(executor)
            .await
            .stage("count date slots")
    }
}
