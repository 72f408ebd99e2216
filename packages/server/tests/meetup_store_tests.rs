//! Integration tests for the meetup store: atomic creation, token lookups,
//! cascade deletion and single-entity access.

mod common;

use crate::common::{create_sample_event, TestHarness, SAMPLE_CONTACT, SAMPLE_DATES};
use meetup_core::common::{
    DateSlotId, EventId, MeetupError, NotFound, OwnerToken, ParticipantToken, ResponseId,
};
use meetup_core::domains::meetups::activities::{
    create_event_with_children, delete_event_cascade, fetch_by_owner_token,
    fetch_by_participant_token, NewDateSlot, NewEvent,
};
use meetup_core::domains::meetups::models::{DateSlot, Event, EventOwner, ParticipantResponse};
use test_context::test_context;
use uuid::Uuid;

fn new_event(description: &str) -> NewEvent {
    NewEvent {
        owner_token: OwnerToken::generate(),
        participant_token: ParticipantToken::generate(),
        description: description.to_string(),
        contact: String::new(),
        alerts: false,
    }
}

// =============================================================================
// Create and load
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn created_graph_loads_by_both_tokens(ctx: &TestHarness) {
    let sample = create_sample_event(&ctx.db_pool).await.unwrap();

    let by_owner = fetch_by_owner_token(&sample.owner_token, &ctx.db_pool)
        .await
        .unwrap();
    let by_participant = fetch_by_participant_token(&sample.participant_token, &ctx.db_pool)
        .await
        .unwrap();

    assert_eq!(by_owner.event.id, sample.id);
    assert_eq!(by_participant.event.id, sample.id);
    assert_eq!(by_owner.event.description, "Team dinner");
    assert_eq!(by_owner.owner.email, SAMPLE_CONTACT);
    assert!(by_owner.owner.alerts);
    assert_eq!(by_owner.timestamps(), SAMPLE_DATES.to_vec());

    for slot in &by_owner.slots {
        assert_eq!(slot.responses.len(), 3);
    }
    assert_eq!(by_owner.availability_of("user1"), SAMPLE_DATES.to_vec());
    assert_eq!(by_owner.availability_of("user2"), SAMPLE_DATES[..2].to_vec());
    assert!(by_owner.availability_of("user3").is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn created_event_has_no_responses_when_none_given(ctx: &TestHarness) {
    let event = new_event("Board games");
    let slots = vec![NewDateSlot::empty(1549537200000)];

    create_event_with_children(&event, &slots, &ctx.db_pool)
        .await
        .unwrap();

    let graph = fetch_by_owner_token(&event.owner_token, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(graph.slots.len(), 1);
    assert!(graph.slots[0].responses.is_empty());
    assert_eq!(graph.owner.email, "");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_without_slots_is_rejected(ctx: &TestHarness) {
    let event = new_event("No dates");

    let err = create_event_with_children(&event, &[], &ctx.db_pool)
        .await
        .unwrap_err();

    assert!(matches!(err, MeetupError::Validation(_)));
    let lookup = fetch_by_owner_token(&event.owner_token, &ctx.db_pool).await;
    assert!(matches!(
        lookup,
        Err(MeetupError::NotFound(NotFound::OwnerToken))
    ));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn failed_create_leaves_nothing_behind(ctx: &TestHarness) {
    let event = new_event("Duplicate dates");
    // The second slot violates the per-event timestamp uniqueness after the
    // event and owner rows were already written.
    let slots = vec![
        NewDateSlot::empty(1549537200000),
        NewDateSlot::empty(1549537200000),
    ];

    let err = create_event_with_children(&event, &slots, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, MeetupError::Store(_)));

    let by_owner = fetch_by_owner_token(&event.owner_token, &ctx.db_pool).await;
    let by_participant = fetch_by_participant_token(&event.participant_token, &ctx.db_pool).await;
    assert!(matches!(
        by_owner,
        Err(MeetupError::NotFound(NotFound::OwnerToken))
    ));
    assert!(matches!(
        by_participant,
        Err(MeetupError::NotFound(NotFound::ParticipantToken))
    ));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_tokens_are_not_found(ctx: &TestHarness) {
    let owner = fetch_by_owner_token(&OwnerToken::generate(), &ctx.db_pool).await;
    let participant = fetch_by_participant_token(&ParticipantToken::generate(), &ctx.db_pool).await;

    let owner_err = owner.unwrap_err();
    assert!(owner_err.is_not_found());
    assert_eq!(owner_err.public_message(), "owner token not found.");
    assert!(participant.unwrap_err().is_not_found());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn owner_token_does_not_open_participant_lookup(ctx: &TestHarness) {
    let sample = create_sample_event(&ctx.db_pool).await.unwrap();
    let crossed = ParticipantToken::parse(sample.owner_token.as_str()).unwrap();

    let result = fetch_by_participant_token(&crossed, &ctx.db_pool).await;

    assert!(matches!(
        result,
        Err(MeetupError::NotFound(NotFound::ParticipantToken))
    ));
}

// =============================================================================
// Cascade delete
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_removes_whole_graph(ctx: &TestHarness) {
    let sample = create_sample_event(&ctx.db_pool).await.unwrap();
    let graph = fetch_by_owner_token(&sample.owner_token, &ctx.db_pool)
        .await
        .unwrap();
    let slot_ids: Vec<DateSlotId> = graph.slots.iter().map(|s| s.slot.id).collect();

    delete_event_cascade(&sample.owner_token, &ctx.db_pool)
        .await
        .unwrap();

    assert!(fetch_by_owner_token(&sample.owner_token, &ctx.db_pool)
        .await
        .unwrap_err()
        .is_not_found());
    assert!(fetch_by_participant_token(&sample.participant_token, &ctx.db_pool)
        .await
        .unwrap_err()
        .is_not_found());
    assert_eq!(DateSlot::count_by_ids(&slot_ids, &ctx.db_pool).await.unwrap(), 0);
    assert_eq!(
        ParticipantResponse::count_for_slots(&slot_ids, &ctx.db_pool)
            .await
            .unwrap(),
        0
    );
    assert!(EventOwner::find_for_event(sample.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_with_unknown_owner_token_is_not_found(ctx: &TestHarness) {
    let err = delete_event_cascade(&OwnerToken::generate(), &ctx.db_pool)
        .await
        .unwrap_err();

    assert!(matches!(err, MeetupError::NotFound(NotFound::OwnerToken)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_leaves_other_events_alone(ctx: &TestHarness) {
    let doomed = create_sample_event(&ctx.db_pool).await.unwrap();
    let kept = create_sample_event(&ctx.db_pool).await.unwrap();

    delete_event_cascade(&doomed.owner_token, &ctx.db_pool)
        .await
        .unwrap();

    let graph = fetch_by_owner_token(&kept.owner_token, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(graph.slots.len(), SAMPLE_DATES.len());
    assert_eq!(graph.participant_names().len(), 3);
}

// =============================================================================
// Single-entity access
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn missing_rows_are_not_found_by_id(ctx: &TestHarness) {
    let event = Event::find_by_id(EventId::from_uuid(Uuid::new_v4()), &ctx.db_pool).await;
    let slot = DateSlot::find_by_id(DateSlotId::from_uuid(Uuid::new_v4()), &ctx.db_pool).await;
    let response =
        ParticipantResponse::find_by_id(ResponseId::from_uuid(Uuid::new_v4()), &ctx.db_pool).await;

    assert!(matches!(
        event,
        Err(MeetupError::NotFound(NotFound::Row { entity: "event", .. }))
    ));
    assert!(slot.unwrap_err().is_not_found());
    assert!(response.unwrap_err().is_not_found());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_of_missing_row_is_not_found(ctx: &TestHarness) {
    let missing = EventId::from_uuid(Uuid::new_v4());

    let err = Event::update(missing, "renamed", &ctx.db_pool)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn single_slot_crud(ctx: &TestHarness) {
    let sample = create_sample_event(&ctx.db_pool).await.unwrap();

    let slot_id = DateSlot::create(sample.id, 1550000000000, &ctx.db_pool)
        .await
        .unwrap();
    let slot = DateSlot::find_by_id(slot_id, &ctx.db_pool).await.unwrap();
    assert_eq!(slot.event_id, sample.id);
    assert_eq!(slot.timestamp_ms, 1550000000000);

    DateSlot::update(slot_id, 1550000000001, &ctx.db_pool)
        .await
        .unwrap();
    let slot = DateSlot::find_by_id(slot_id, &ctx.db_pool).await.unwrap();
    assert_eq!(slot.timestamp_ms, 1550000000001);

    DateSlot::delete(slot_id, &ctx.db_pool).await.unwrap();
    assert!(DateSlot::find_by_id(slot_id, &ctx.db_pool)
        .await
        .unwrap_err()
        .is_not_found());

    // Deleting again is not an error
    DateSlot::delete(slot_id, &ctx.db_pool).await.unwrap();
}

#[test_context(TestHarness)]
#[tokio::test]
async fn single_response_crud(ctx: &TestHarness) {
    let sample = create_sample_event(&ctx.db_pool).await.unwrap();
    let slot_id = DateSlot::create(sample.id, 1550000000000, &ctx.db_pool)
        .await
        .unwrap();

    let id = ParticipantResponse::create(slot_id, "user4", true, &ctx.db_pool)
        .await
        .unwrap();
    ParticipantResponse::update(id, "user4", false, &ctx.db_pool)
        .await
        .unwrap();

    let response = ParticipantResponse::find_by_id(id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(response.date_slot_id, slot_id);
    assert_eq!(response.name, "user4");
    assert!(!response.available);

    ParticipantResponse::delete(id, &ctx.db_pool).await.unwrap();
    assert!(ParticipantResponse::find_by_id(id, &ctx.db_pool)
        .await
        .unwrap_err()
        .is_not_found());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn owner_record_update(ctx: &TestHarness) {
    let sample = create_sample_event(&ctx.db_pool).await.unwrap();
    let owner = EventOwner::find_for_event(sample.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();

    EventOwner::update(owner.id, "", false, &ctx.db_pool)
        .await
        .unwrap();

    let owner = EventOwner::find_by_id(owner.id, &ctx.db_pool).await.unwrap();
    assert_eq!(owner.email, "");
    assert!(!owner.alerts);
}
