use serde::Serialize;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::common::{DateSlotId, EventId, NotFound, ResponseId, Result, StageExt};

/// ParticipantResponse - whether `name` can make one date slot.
///
/// Names are the only participant identity; `(date_slot_id, name)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ParticipantResponse {
    #[serde(skip)]
    pub id: ResponseId,
    #[serde(skip)]
    pub date_slot_id: DateSlotId,
    pub name: String,
    pub available: bool,
}

impl ParticipantResponse {
    pub async fn create<'e>(
        date_slot_id: DateSlotId,
        name: &str,
        available: bool,
        executor: impl PgExecutor<'e>,
    ) -> Result<ResponseId> {
        sqlx::query_scalar::<_, ResponseId>(
            r#"
            INSERT INTO participant_responses (date_slot_id, name, available)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(date_slot_id)
        .bind(name)
        .bind(available)
        .fetch_one(executor)
        .await
        .stage("insert participant response")
    }

    pub async fn find_by_id<'e>(id: ResponseId, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM participant_responses WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .stage("select participant response")?
            .ok_or_else(|| {
                NotFound::Row {
                    entity: "participant response",
                    id: id.into_uuid(),
                }
                .into()
            })
    }

    /// Responses for the given slots, ordered by slot then name.
    pub async fn find_for_slots<'e>(
        slot_ids: &[DateSlotId],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<Self>> {
        let ids: Vec<Uuid> = slot_ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM participant_responses
            WHERE date_slot_id = ANY($1)
            ORDER BY date_slot_id, name
            "#,
        )
        .bind(ids)
        .fetch_all(executor)
        .await
        .stage("select participant responses for slots")
    }

    pub async fn update<'e>(
        id: ResponseId,
        name: &str,
        available: bool,
        executor: impl PgExecutor<'e>,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE participant_responses SET name = $2, available = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .bind(available)
        .execute(executor)
        .await
        .stage("update participant response")?;

        if result.rows_affected() == 0 {
            return Err(NotFound::Row {
                entity: "participant response",
                id: id.into_uuid(),
            }
            .into());
        }
        Ok(())
    }

    /// Insert or overwrite the answer of `name` for one slot.
    pub async fn upsert<'e>(
        date_slot_id: DateSlotId,
        name: &str,
        available: bool,
        executor: impl PgExecutor<'e>,
    ) -> Result<ResponseId> {
        sqlx::query_scalar::<_, ResponseId>(
            r#"
            INSERT INTO participant_responses (date_slot_id, name, available)
            VALUES ($1, $2, $3)
            ON CONFLICT (date_slot_id, name) DO UPDATE SET available = EXCLUDED.available
            RETURNING id
            "#,
        )
        .bind(date_slot_id)
        .bind(name)
        .bind(available)
        .fetch_one(executor)
        .await
        .stage("upsert participant response")
    }

    pub async fn delete<'e>(id: ResponseId, executor: impl PgExecutor<'e>) -> Result<()> {
        sqlx::query("DELETE FROM participant_responses WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .stage("delete participant response")?;
        Ok(())
    }

    /// Remove every answer `name` gave on any slot of the event.
    pub async fn delete_by_name_for_event<'e>(
        event_id: EventId,
        name: &str,
        executor: impl PgExecutor<'e>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM participant_responses r
            USING date_slots s
            WHERE r.date_slot_id = s.id
              AND s.event_id = $1
              AND r.name = $2
            "#,
        )
        .bind(event_id)
        .bind(name)
        .execute(executor)
        .await
        .stage("delete participant responses by name")?;
        Ok(result.rows_affected())
    }

    /// Counts responses still pointing at any of `slot_ids`.
    pub async fn count_for_slots<'e>(
        slot_ids: &[DateSlotId],
        executor: impl PgExecutor<'e>,
    ) -> Result<i64> {
        let ids: Vec<Uuid> = slot_ids.iter().map(|id| id.into_uuid()).collect();
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM participant_responses WHERE date_slot_id = ANY($1)",
        )
        .bind(ids)
        .fetch_one(executor)
        .await
        .stage("count participant responses")
    }
}
