//! Save event action - create when no owner token is given, otherwise
//! reconcile the existing event.

use tracing::{debug, info};

use super::log_failure;
use crate::common::validation::{parse_token, validate_contact, validate_dates};
use crate::common::{Owner, OwnerToken, ParticipantToken, Result, ValidationError};
use crate::domains::meetups::activities::{
    create_event_with_children, update_event, EventChanges, NewDateSlot, NewEvent,
};
use crate::domains::meetups::data::{SaveEventRequest, TokenPair};
use crate::domains::meetups::events::{MeetupEvent, OwnerContact};
use crate::kernel::ServerDeps;

pub async fn save_event(request: SaveEventRequest, deps: &ServerDeps) -> Result<TokenPair> {
    let result = save_event_inner(request, deps).await;
    if let Err(e) = &result {
        log_failure("save_event", e);
    }
    result
}

async fn save_event_inner(request: SaveEventRequest, deps: &ServerDeps) -> Result<TokenPair> {
    let dates = validate_dates(&request.dates)?;
    if !request.users.is_empty() {
        return Err(ValidationError::UnexpectedResponses.into());
    }
    let contact = validate_contact(request.contact.as_deref())?;
    let alerts = request.alert_on_change.unwrap_or(false);

    let existing = request.owner_token().map(str::to_string);

    match existing {
        None => {
            let owner_token = OwnerToken::generate();
            let participant_token = distinct_participant_token(&owner_token);
            let new_event = NewEvent {
                owner_token,
                participant_token,
                description: request.description,
                contact,
                alerts,
            };
            let slots: Vec<NewDateSlot> = dates.iter().map(|&ts| NewDateSlot::empty(ts)).collect();

            create_event_with_children(&new_event, &slots, &deps.db_pool).await?;

            deps.notify(MeetupEvent::EventCreated {
                owner_token: new_event.owner_token.clone(),
                participant_token: new_event.participant_token.clone(),
                contact: OwnerContact {
                    email: new_event.contact.clone(),
                    alerts: new_event.alerts,
                },
            })
            .await;

            Ok(TokenPair {
                participant_token: new_event.participant_token.into_string(),
                owner_token: new_event.owner_token.into_string(),
            })
        }
        Some(raw) => {
            let token = parse_token::<Owner>(&raw)?;
            let changes = EventChanges {
                description: request.description,
                contact,
                alerts,
                dates,
            };

            let outcome = update_event(&token, &changes, &deps.db_pool).await?;
            info!(
                removed = ?outcome.removed,
                ignored = ?outcome.ignored_additions,
                "owner update applied"
            );

            let pair = TokenPair::from(&outcome.graph);
            deps.notify(MeetupEvent::EventUpdated {
                owner_token: outcome.graph.event.owner_token.clone(),
                participant_token: outcome.graph.event.participant_token.clone(),
                contact: OwnerContact::from(&outcome.graph),
                removed_dates: outcome.removed,
                ignored_dates: outcome.ignored_additions,
            })
            .await;

            Ok(pair)
        }
    }
}

/// Participant tokens are drawn independently of the owner token, so an
/// equal pair is astronomically unlikely; redraw on the off chance.
fn distinct_participant_token(owner_token: &OwnerToken) -> ParticipantToken {
    loop {
        let candidate = ParticipantToken::generate();
        if candidate.as_str() != owner_token.as_str() {
            return candidate;
        }
        debug!("participant token redrawn");
    }
}
