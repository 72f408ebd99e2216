//! Typed ID definitions for the meetup entities.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Event rows (the meetup itself).
pub struct Event;

/// Marker type for the owner sub-record (contact address and alert flag).
pub struct EventOwner;

/// Marker type for DateSlot rows (one candidate date).
pub struct DateSlot;

/// Marker type for ParticipantResponse rows (one name's answer for one slot).
pub struct ParticipantResponse;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type EventId = Id<Event>;

pub type EventOwnerId = Id<EventOwner>;

pub type DateSlotId = Id<DateSlot>;

pub type ResponseId = Id<ParticipantResponse>;
