//! Owner edits: scalar fields plus reconciliation of the stored date set.
//!
//! Slots are matched by timestamp, never by id. A stored slot whose
//! timestamp is missing from the request is deleted along with its
//! responses. A stored slot that is still requested is left alone, answers
//! included. A requested timestamp with no stored slot is *not* inserted;
//! it is reported back in [`ReconcileOutcome::ignored_additions`] so the
//! caller can see what was dropped.

use sqlx::{PgConnection, PgPool};
use std::collections::BTreeSet;
use tracing::{info, warn};

use super::load_event::load_by_owner_token;
use super::transaction::{begin, finish};
use crate::common::{DateSlotId, OwnerToken, Result, StoreError};
use crate::domains::meetups::models::{
    DateSlot, Event, EventGraph, EventOwner, ParticipantResponse,
};

/// Everything an owner may change in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventChanges {
    pub description: String,
    pub contact: String,
    pub alerts: bool,
    pub dates: BTreeSet<i64>,
}

/// Which stored slots survive a requested date set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub retain: Vec<DateSlot>,
    pub remove: Vec<DateSlot>,
    /// Requested timestamps with no stored slot.
    pub ignored_additions: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The event as committed.
    pub graph: EventGraph,
    pub removed: Vec<i64>,
    pub ignored_additions: Vec<i64>,
}

/// Split `stored` by whether each slot's timestamp is in `requested`.
pub fn plan_reconciliation(stored: &[DateSlot], requested: &BTreeSet<i64>) -> ReconcilePlan {
    let (retain, remove): (Vec<DateSlot>, Vec<DateSlot>) = stored
        .iter()
        .cloned()
        .partition(|slot| requested.contains(&slot.timestamp_ms));

    let stored_timestamps: BTreeSet<i64> = stored.iter().map(|s| s.timestamp_ms).collect();
    let ignored_additions = requested
        .difference(&stored_timestamps)
        .copied()
        .collect();

    ReconcilePlan {
        retain,
        remove,
        ignored_additions,
    }
}

/// Apply `changes` to the event behind `token` in one transaction.
///
/// The description, contact and alert flag are always overwritten. Removed
/// slots are deleted. If any step fails, all of it is rolled back,
/// the scalar update included. Concurrent updates are last-commit-wins.
pub async fn update_event(
    token: &OwnerToken,
    changes: &EventChanges,
    pool: &PgPool,
) -> Result<ReconcileOutcome> {
    let mut tx = begin(pool).await?;
    let outcome = reconcile(token, changes, &mut tx).await;
    let outcome = finish(tx, outcome).await?;

    info!(
        event_id = %outcome.graph.event.id,
        retained = outcome.graph.slots.len(),
        removed = outcome.removed.len(),
        ignored = outcome.ignored_additions.len(),
        "event reconciled"
    );
    Ok(outcome)
}

async fn reconcile(
    token: &OwnerToken,
    changes: &EventChanges,
    conn: &mut PgConnection,
) -> Result<ReconcileOutcome> {
    let current = load_by_owner_token(token, &mut *conn).await?;
    let stored: Vec<DateSlot> = current.slots.iter().map(|s| s.slot.clone()).collect();
    let plan = plan_reconciliation(&stored, &changes.dates);

    if !plan.ignored_additions.is_empty() {
        warn!(
            event_id = %current.event.id,
            dates = ?plan.ignored_additions,
            "requested dates not present on the event were not added"
        );
    }
    if plan.retain.is_empty() {
        warn!(event_id = %current.event.id, "reconciliation leaves the event without dates");
    }

    Event::update(current.event.id, &changes.description, &mut *conn).await?;
    EventOwner::update(current.owner.id, &changes.contact, changes.alerts, &mut *conn).await?;

    for slot in &plan.remove {
        DateSlot::delete(slot.id, &mut *conn).await?;
    }

    let removed_ids: Vec<DateSlotId> = plan.remove.iter().map(|s| s.id).collect();
    verify_removed(&removed_ids, conn).await?;

    let graph = load_by_owner_token(token, &mut *conn).await?;
    Ok(ReconcileOutcome {
        graph,
        removed: plan.remove.iter().map(|s| s.timestamp_ms).collect(),
        ignored_additions: plan.ignored_additions,
    })
}

/// Removed slots and their responses must be gone before commit.
async fn verify_removed(removed: &[DateSlotId], conn: &mut PgConnection) -> Result<()> {
    if removed.is_empty() {
        return Ok(());
    }

    let slots_left = DateSlot::count_by_ids(removed, &mut *conn).await?;
    let responses_left = ParticipantResponse::count_for_slots(removed, &mut *conn).await?;
    if slots_left != 0 || responses_left != 0 {
        return Err(StoreError::Inconsistent {
            stage: "verify reconciliation",
            detail: format!(
                "{} removed slots and {} of their responses still present",
                slots_left, responses_left
            ),
        }
        .into());
    }
    Ok(())
}
