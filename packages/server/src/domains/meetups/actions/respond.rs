//! Participant response actions, keyed by participant name.

use tracing::debug;

use super::log_failure;
use crate::common::validation::{parse_token, validate_availability, validate_name};
use crate::common::{Participant, Result};
use crate::domains::meetups::activities::{
    delete_participant_response, save_participant_response,
};
use crate::domains::meetups::data::{DeleteResponseRequest, SaveResponseRequest};
use crate::domains::meetups::events::{MeetupEvent, OwnerContact};
use crate::kernel::ServerDeps;

/// Create the participant's answers, or overwrite them if the name already
/// answered. On an event with no dates left nothing is stored and nothing
/// is published.
pub async fn save_response(request: SaveResponseRequest, deps: &ServerDeps) -> Result<()> {
    let result = save_response_inner(request, deps).await;
    if let Err(e) = &result {
        log_failure("save_response", e);
    }
    result
}

async fn save_response_inner(request: SaveResponseRequest, deps: &ServerDeps) -> Result<()> {
    let token = parse_token::<Participant>(&request.participant_token)?;
    let name = validate_name(&request.participant_name)?;
    let available = validate_availability(&request.dates)?;

    let outcome = save_participant_response(&token, &name, &available, &deps.db_pool).await?;
    if outcome.rows_written == 0 {
        debug!("event has no dates, response not recorded");
        return Ok(());
    }
    let contact = OwnerContact::from(&outcome.graph);

    let event = if outcome.added {
        MeetupEvent::ParticipantAdded {
            participant_token: token,
            name,
            contact,
        }
    } else {
        MeetupEvent::ParticipantChanged {
            participant_token: token,
            name,
            contact,
        }
    };
    deps.notify(event).await;
    Ok(())
}

/// Remove all of a participant's answers. Unknown names succeed quietly and
/// publish nothing.
pub async fn delete_response(request: DeleteResponseRequest, deps: &ServerDeps) -> Result<()> {
    let result = delete_response_inner(request, deps).await;
    if let Err(e) = &result {
        log_failure("delete_response", e);
    }
    result
}

async fn delete_response_inner(request: DeleteResponseRequest, deps: &ServerDeps) -> Result<()> {
    let token = parse_token::<Participant>(&request.participant_token)?;
    let name = validate_name(&request.participant_name)?;

    let outcome = delete_participant_response(&token, &name, &deps.db_pool).await?;
    if outcome.removed_rows == 0 {
        debug!("no responses matched the participant name");
        return Ok(());
    }

    deps.notify(MeetupEvent::ParticipantRemoved {
        participant_token: token,
        name,
        contact: OwnerContact::from(&outcome.graph),
    })
    .await;
    Ok(())
}
