use serde::Serialize;
use sqlx::PgExecutor;

use crate::common::{EventId, EventOwnerId, NotFound, Result, StageExt};

/// EventOwner - the organizer's contact address and alert preference
/// (source term: Admin). Exactly one per event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct EventOwner {
    #[serde(skip)]
    pub id: EventOwnerId,
    #[serde(skip)]
    pub event_id: EventId,
    pub email: String,
    pub alerts: bool,
}

impl EventOwner {
    pub async fn create<'e>(
        event_id: EventId,
        email: &str,
        alerts: bool,
        executor: impl PgExecutor<'e>,
    ) -> Result<EventOwnerId> {
        sqlx::query_scalar::<_, EventOwnerId>(
            r#"
            INSERT INTO event_owners (event_id, email, alerts)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(event_id)
        .bind(email)
        .bind(alerts)
        .fetch_one(executor)
        .await
        .stage("insert event owner")
    }

    pub async fn find_by_id<'e>(id: EventOwnerId, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM event_owners WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .stage("select event owner")?
            .ok_or_else(|| {
                NotFound::Row {
                    entity: "event owner",
                    id: id.into_uuid(),
                }
                .into()
            })
    }

    pub async fn find_for_event<'e>(
        event_id: EventId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM event_owners WHERE event_id = $1")
            .bind(event_id)
            .fetch_optional(executor)
            .await
            .stage("select event owner for event")
    }

    pub async fn update<'e>(
        id: EventOwnerId,
        email: &str,
        alerts: bool,
        executor: impl PgExecutor<'e>,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE event_owners SET email = $2, alerts = $3 WHERE id = $1")
            .bind(id)
            .bind(email)
            .bind(alerts)
            .execute(executor)
            .await
            .stage("update event owner")?;

        if result.rows_affected() == 0 {
            return Err(NotFound::Row {
                entity: "event owner",
                id: id.into_uuid(),
            }
            .into());
        }
        Ok(())
    }

    pub async fn delete<'e>(id: EventOwnerId, executor: impl PgExecutor<'e>) -> Result<()> {
        sqlx::query("DELETE FROM event_owners WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .stage("delete event owner")?;
        Ok(())
    }
}
