//! Meetup scheduling: events, candidate date slots and participant
//! availability, guarded by owner and participant capability tokens.

pub mod actions;
pub mod activities;
pub mod data;
pub mod events;
pub mod models;
pub mod notifications;

pub use actions::*;
pub use events::{MeetupEvent, OwnerContact};
