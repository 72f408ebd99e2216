pub mod create_event;
pub mod delete_event;
pub mod load_event;
pub mod participants;
pub mod transaction;
pub mod update_event;

pub use create_event::{create_event_with_children, NewDateSlot, NewEvent, NewResponse};
pub use delete_event::delete_event_cascade;
pub use load_event::{
    fetch_by_owner_token, fetch_by_participant_token, load_by_owner_token,
    load_by_participant_token,
};
pub use participants::{
    delete_participant_response, save_participant_response, RemovalOutcome, ResponseOutcome,
};
pub use update_event::{
    plan_reconciliation, update_event, EventChanges, ReconcileOutcome, ReconcilePlan,
};
