// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod token;
pub mod validation;

pub use entity_ids::*;
pub use errors::{MeetupError, NotFound, Result, StageExt, StoreError, ValidationError};
pub use id::Id;
pub use token::{CapabilityToken, Owner, OwnerToken, Participant, ParticipantToken, TokenError};
