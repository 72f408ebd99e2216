//! Participant answers, addressed by participant token and name.

use sqlx::{PgConnection, PgPool};
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::load_event::load_by_participant_token;
use super::transaction::{begin, finish};
use crate::common::{ParticipantToken, Result};
use crate::domains::meetups::models::{Event, EventGraph, ParticipantResponse};

#[derive(Debug, Clone)]
pub struct ResponseOutcome {
    /// Rows inserted or overwritten. Zero when the event has no slots left.
    pub rows_written: usize,
    /// True when rows were written and no slot had an answer from this name
    /// before.
    pub added: bool,
    /// Requested timestamps that match no slot of the event.
    pub ignored_dates: Vec<i64>,
    pub graph: EventGraph,
}

#[derive(Debug, Clone)]
pub struct RemovalOutcome {
    pub removed_rows: u64,
    pub graph: EventGraph,
}

/// Record that `name` is available exactly on `available`.
///
/// Every slot of the event gets a row for `name`: `true` if its timestamp is
/// listed, `false` otherwise. Existing rows are overwritten in place. An
/// event without slots stores nothing and reports `rows_written == 0`.
pub async fn save_participant_response(
    token: &ParticipantToken,
    name: &str,
    available: &BTreeSet<i64>,
    pool: &PgPool,
) -> Result<ResponseOutcome> {
    let mut tx = begin(pool).await?;
    let outcome = upsert_all(token, name, available, &mut tx).await;
    let outcome = finish(tx, outcome).await?;

    info!(
        event_id = %outcome.graph.event.id,
        added = outcome.added,
        rows = outcome.rows_written,
        "participant response saved"
    );
    Ok(outcome)
}

async fn upsert_all(
    token: &ParticipantToken,
    name: &str,
    available: &BTreeSet<i64>,
    conn: &mut PgConnection,
) -> Result<ResponseOutcome> {
    let current = load_by_participant_token(token, &mut *conn).await?;
    if current.slots.is_empty() {
        debug!(event_id = %current.event.id, "event has no slots, nothing to record");
    }
    let rows_written = current.slots.len();
    let added = rows_written > 0 && !current.has_participant(name);

    for slot in &current.slots {
        let is_available = available.contains(&slot.slot.timestamp_ms);
        ParticipantResponse::upsert(slot.slot.id, name, is_available, &mut *conn).await?;
    }

    let known: BTreeSet<i64> = current.timestamps().into_iter().collect();
    let ignored_dates: Vec<i64> = available.difference(&known).copied().collect();
    if !ignored_dates.is_empty() {
        debug!(dates = ?ignored_dates, "availability for unknown dates ignored");
    }

    let graph = load_by_participant_token(token, &mut *conn).await?;
    Ok(ResponseOutcome {
        rows_written,
        added,
        ignored_dates,
        graph,
    })
}

/// Remove every answer `name` gave on this event. Unknown names remove
/// nothing and are not an error.
pub async fn delete_participant_response(
    token: &ParticipantToken,
    name: &str,
    pool: &PgPool,
) -> Result<RemovalOutcome> {
    let mut tx = begin(pool).await?;
    let outcome = delete_all(token, name, &mut tx).await;
    let outcome = finish(tx, outcome).await?;

    info!(
        event_id = %outcome.graph.event.id,
        removed_rows = outcome.removed_rows,
        "participant response deleted"
    );
    Ok(outcome)
}

async fn delete_all(
    token: &ParticipantToken,
    name: &str,
    conn: &mut PgConnection,
) -> Result<RemovalOutcome> {
    let event = Event::find_by_participant_token(token, &mut *conn).await?;
    let removed_rows = ParticipantResponse::delete_by_name_for_event(event.id, name, &mut *conn).await?;
    let graph = load_by_participant_token(token, &mut *conn).await?;
    Ok(RemovalOutcome {
        removed_rows,
        graph,
    })
}
