//! Resolve a capability token to a full event graph.
//!
//! Loading happens in stages: event row, owner record, date slots, then the
//! responses for those slots. Each query tags its failure with its stage, and
//! a failed stage discards everything loaded before it.

use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use tracing::debug;

use crate::common::{
    DateSlotId, OwnerToken, ParticipantToken, Result, StageExt, StoreError,
};
use crate::domains::meetups::models::{
    DateSlot, Event, EventGraph, EventOwner, ParticipantResponse, SlotGraph,
};

pub async fn load_by_owner_token(token: &OwnerToken, conn: &mut PgConnection) -> Result<EventGraph> {
    let event = Event::find_by_owner_token(token, &mut *conn).await?;
    assemble(event, conn).await
}

pub async fn load_by_participant_token(
    token: &ParticipantToken,
    conn: &mut PgConnection,
) -> Result<EventGraph> {
    let event = Event::find_by_participant_token(token, &mut *conn).await?;
    assemble(event, conn).await
}

/// Pool-level entry point for read-only callers.
pub async fn fetch_by_owner_token(token: &OwnerToken, pool: &PgPool) -> Result<EventGraph> {
    let mut conn = pool.acquire().await.stage("acquire connection")?;
    load_by_owner_token(token, &mut conn).await
}

pub async fn fetch_by_participant_token(
    token: &ParticipantToken,
    pool: &PgPool,
) -> Result<EventGraph> {
    let mut conn = pool.acquire().await.stage("acquire connection")?;
    load_by_participant_token(token, &mut conn).await
}

async fn assemble(event: Event, conn: &mut PgConnection) -> Result<EventGraph> {
    let owner = EventOwner::find_for_event(event.id, &mut *conn)
        .await?
        .ok_or_else(|| StoreError::Inconsistent {
            stage: "load event owner",
            detail: format!("event {} has no owner record", event.id),
        })?;

    let slots = DateSlot::find_for_event(event.id, &mut *conn).await?;
    let slot_ids: Vec<DateSlotId> = slots.iter().map(|s| s.id).collect();

    let mut by_slot: HashMap<DateSlotId, Vec<ParticipantResponse>> = HashMap::new();
    for response in ParticipantResponse::find_for_slots(&slot_ids, &mut *conn).await? {
        by_slot.entry(response.date_slot_id).or_default().push(response);
    }

    let slots: Vec<SlotGraph> = slots
        .into_iter()
        .map(|slot| SlotGraph {
            responses: by_slot.remove(&slot.id).unwrap_or_default(),
            slot,
        })
        .collect();

    debug!(event_id = %event.id, slots = slots.len(), "event graph loaded");

    Ok(EventGraph {
        event,
        owner,
        slots,
    })
}
