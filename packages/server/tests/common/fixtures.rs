//! Test fixtures for creating test data.
//!
//! These go through the create activity directly so tests can seed responses,
//! which the public create action refuses.

use anyhow::Result;
use meetup_core::common::{EventId, OwnerToken, ParticipantToken};
use meetup_core::domains::meetups::activities::{
    create_event_with_children, NewDateSlot, NewEvent, NewResponse,
};
use sqlx::PgPool;

/// Five consecutive days in February 2019, epoch milliseconds.
pub const SAMPLE_DATES: [i64; 5] = [
    1549537200000,
    1549623600000,
    1549710000000,
    1549796400000,
    1549882800000,
];

pub const SAMPLE_CONTACT: &str = "organizer@example.com";

pub struct SampleEvent {
    pub id: EventId,
    pub owner_token: OwnerToken,
    pub participant_token: ParticipantToken,
}

fn answer(name: &str, available: bool) -> NewResponse {
    NewResponse {
        name: name.to_string(),
        available,
    }
}

/// Sample event with three participants:
/// - user1 can make every date
/// - user2 can make only the first two
/// - user3 can make none
pub async fn create_sample_event(pool: &PgPool) -> Result<SampleEvent> {
    let owner_token = OwnerToken::generate();
    let participant_token = ParticipantToken::generate();

    let slots: Vec<NewDateSlot> = SAMPLE_DATES
        .iter()
        .enumerate()
        .map(|(i, &ts)| NewDateSlot {
            timestamp_ms: ts,
            responses: vec![
                answer("user1", true),
                answer("user2", i < 2),
                answer("user3", false),
            ],
        })
        .collect();

    let id = create_event_with_children(
        &NewEvent {
            owner_token: owner_token.clone(),
            participant_token: participant_token.clone(),
            description: "Team dinner".to_string(),
            contact: SAMPLE_CONTACT.to_string(),
            alerts: true,
        },
        &slots,
        pool,
    )
    .await?;

    Ok(SampleEvent {
        id,
        owner_token,
        participant_token,
    })
}

/// Event on `dates` where user1 is available on every one of them.
pub async fn create_event_with_dates(pool: &PgPool, dates: &[i64]) -> Result<SampleEvent> {
    let owner_token = OwnerToken::generate();
    let participant_token = ParticipantToken::generate();

    let slots: Vec<NewDateSlot> = dates
        .iter()
        .map(|&ts| NewDateSlot {
            timestamp_ms: ts,
            responses: vec![answer("user1", true)],
        })
        .collect();

    let id = create_event_with_children(
        &NewEvent {
            owner_token: owner_token.clone(),
            participant_token: participant_token.clone(),
            description: "Standup".to_string(),
            contact: SAMPLE_CONTACT.to_string(),
            alerts: false,
        },
        &slots,
        pool,
    )
    .await?;

    Ok(SampleEvent {
        id,
        owner_token,
        participant_token,
    })
}
