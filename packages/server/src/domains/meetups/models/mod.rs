pub mod date_slot;
pub mod event;
pub mod event_owner;
pub mod graph;
pub mod participant_response;

pub use date_slot::DateSlot;
pub use event::Event;
pub use event_owner::EventOwner;
pub use graph::{EventGraph, SlotGraph};
pub use participant_response::ParticipantResponse;
