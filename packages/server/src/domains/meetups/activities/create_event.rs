use sqlx::{PgConnection, PgPool};
use tracing::info;

use super::transaction::{begin, finish};
use crate::common::{EventId, OwnerToken, ParticipantToken, Result, ValidationError};
use crate::domains::meetups::models::{DateSlot, Event, EventOwner, ParticipantResponse};

/// Scalar fields of an event about to be inserted.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub owner_token: OwnerToken,
    pub participant_token: ParticipantToken,
    pub description: String,
    pub contact: String,
    pub alerts: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDateSlot {
    pub timestamp_ms: i64,
    pub responses: Vec<NewResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResponse {
    pub name: String,
    pub available: bool,
}

impl NewDateSlot {
    pub fn empty(timestamp_ms: i64) -> Self {
        Self {
            timestamp_ms,
            responses: Vec::new(),
        }
    }
}

/// Insert an event, its owner record, its slots and any initial responses as
/// one unit.
///
/// Either every row lands or none does. `event` is only read; callers that
/// need the stored graph fetch it again by token.
pub async fn create_event_with_children(
    event: &NewEvent,
    slots: &[NewDateSlot],
    pool: &PgPool,
) -> Result<EventId> {
    if slots.is_empty() {
        return Err(ValidationError::NoDates.into());
    }

    let mut tx = begin(pool).await?;
    let outcome = insert_graph(event, slots, &mut tx).await;
    let event_id = finish(tx, outcome).await?;

    info!(
        event_id = %event_id,
        slots = slots.len(),
        "event created"
    );
    Ok(event_id)
}

async fn insert_graph(
    event: &NewEvent,
    slots: &[NewDateSlot],
    conn: &mut PgConnection,
) -> Result<EventId> {
    let event_id = Event::create(
        &event.owner_token,
        &event.participant_token,
        &event.description,
        &mut *conn,
    )
    .await?;

    EventOwner::create(event_id, &event.contact, event.alerts, &mut *conn).await?;

    for slot in slots {
        let slot_id = DateSlot::create(event_id, slot.timestamp_ms, &mut *conn).await?;
        for response in &slot.responses {
            ParticipantResponse::create(slot_id, &response.name, response.available, &mut *conn)
                .await?;
        }
    }

    Ok(event_id)
}
