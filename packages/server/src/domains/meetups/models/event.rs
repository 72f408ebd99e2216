use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;

use crate::common::{
    EventId, MeetupError, NotFound, OwnerToken, ParticipantToken, Result, StageExt,
};

/// Event - the meetup record (source term: MeetUp)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Event {
    #[serde(skip)]
    pub id: EventId,
    pub owner_token: OwnerToken,
    pub participant_token: ParticipantToken,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Event {
    /// Insert an event row. Tokens are written once here and never updated.
    pub async fn create<'e>(
        owner_token: &OwnerToken,
        participant_token: &ParticipantToken,
        description: &str,
        executor: impl PgExecutor<'e>,
    ) -> Result<EventId> {
        sqlx::query_scalar::<_, EventId>(
            r#"
            INSERT INTO events (owner_token, participant_token, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(owner_token)
        .bind(participant_token)
        .bind(description)
        .fetch_one(executor)
        .await
        .stage("insert event")
    }

    pub async fn find_by_id<'e>(id: EventId, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .stage("select event")?
            .ok_or_else(|| {
                NotFound::Row {
                    entity: "event",
                    id: id.into_uuid(),
                }
                .into()
            })
    }

    pub async fn find_by_owner_token<'e>(
        token: &OwnerToken,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM events WHERE owner_token = $1")
            .bind(token)
            .fetch_optional(executor)
            .await
            .stage("select event by owner token")?
            .ok_or(MeetupError::NotFound(NotFound::OwnerToken))
    }

    pub async fn find_by_participant_token<'e>(
        token: &ParticipantToken,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM events WHERE participant_token = $1")
            .bind(token)
            .fetch_optional(executor)
            .await
            .stage("select event by participant token")?
            .ok_or(MeetupError::NotFound(NotFound::ParticipantToken))
    }

    /// Only the description is mutable on the row itself; contact settings
    /// live on the owner sub-record.
    pub async fn update<'e>(
        id: EventId,
        description: &str,
        executor: impl PgExecutor<'e>,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE events SET description = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(description)
        .execute(executor)
        .await
        .stage("update event")?;

        if result.rows_affected() == 0 {
            return Err(NotFound::Row {
                entity: "event",
                id: id.into_uuid(),
            }
            .into());
        }
        Ok(())
    }

    /// Idempotent. Date slots, responses and the owner record go with it.
    pub async fn delete<'e>(id: EventId, executor: impl PgExecutor<'e>) -> Result<()> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .stage("delete event")?;
        Ok(())
    }

    /// Single-statement cascade delete. Returns the number of events removed
    /// (0 or 1).
    pub async fn delete_by_owner_token<'e>(
        token: &OwnerToken,
        executor: impl PgExecutor<'e>,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM events WHERE owner_token = $1")
            .bind(token)
            .execute(executor)
            .await
            .stage("delete event by owner token")?;
        Ok(result.rows_affected())
    }
}
