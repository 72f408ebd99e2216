use super::log_failure;
use crate::common::validation::parse_token;
use crate::common::{Owner, Result};
use crate::domains::meetups::activities::delete_event_cascade;
use crate::domains::meetups::data::OwnerTokenRequest;
use crate::domains::meetups::events::MeetupEvent;
use crate::kernel::ServerDeps;

/// Delete the event and everything under it. Irrevocable.
pub async fn delete_event(request: OwnerTokenRequest, deps: &ServerDeps) -> Result<()> {
    let result = delete_event_inner(request, deps).await;
    if let Err(e) = &result {
        log_failure("delete_event", e);
    }
    result
}

async fn delete_event_inner(request: OwnerTokenRequest, deps: &ServerDeps) -> Result<()> {
    let token = parse_token::<Owner>(&request.owner_token)?;
    delete_event_cascade(&token, &deps.db_pool).await?;
    deps.notify(MeetupEvent::EventDeleted { owner_token: token })
        .await;
    Ok(())
}
