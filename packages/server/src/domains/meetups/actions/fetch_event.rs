//! Read-only lookups by capability token.

use super::log_failure;
use crate::common::validation::parse_token;
use crate::common::{Owner, Participant, Result};
use crate::domains::meetups::activities::{fetch_by_owner_token, fetch_by_participant_token};
use crate::domains::meetups::data::{
    OwnerTokenRequest, OwnerView, ParticipantTokenRequest, ParticipantView,
};
use crate::kernel::ServerDeps;

/// Description, dates and every response; no owner settings.
pub async fn get_participant_view(
    request: ParticipantTokenRequest,
    deps: &ServerDeps,
) -> Result<ParticipantView> {
    let result = participant_view_inner(&request, deps).await;
    if let Err(e) = &result {
        log_failure("get_participant_view", e);
    }
    result
}

async fn participant_view_inner(
    request: &ParticipantTokenRequest,
    deps: &ServerDeps,
) -> Result<ParticipantView> {
    let token = parse_token::<Participant>(&request.participant_token)?;
    let graph = fetch_by_participant_token(&token, &deps.db_pool).await?;
    Ok(ParticipantView::from(&graph))
}

/// The full graph including contact and alert settings.
pub async fn get_owner_view(request: OwnerTokenRequest, deps: &ServerDeps) -> Result<OwnerView> {
    let result = owner_view_inner(&request, deps).await;
    if let Err(e) = &result {
        log_failure("get_owner_view", e);
    }
    result
}

async fn owner_view_inner(request: &OwnerTokenRequest, deps: &ServerDeps) -> Result<OwnerView> {
    let token = parse_token::<Owner>(&request.owner_token)?;
    let graph = fetch_by_owner_token(&token, &deps.db_pool).await?;
    Ok(OwnerView::from(&graph))
}
