// Meetup Scheduler - persistence core
//
// Stores meetup events, their candidate dates and participant availability
// in Postgres. Access is granted by two capability tokens per event: one for
// the organizer, one shared with participants.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
