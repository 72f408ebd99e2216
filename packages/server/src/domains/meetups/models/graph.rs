use std::collections::BTreeSet;

use super::date_slot::DateSlot;
use super::event::Event;
use super::event_owner::EventOwner;
use super::participant_response::ParticipantResponse;

/// A fully loaded event: the row, its owner record, and every slot with the
/// responses given for it.
#[derive(Debug, Clone)]
pub struct EventGraph {
    pub event: Event,
    pub owner: EventOwner,
    pub slots: Vec<SlotGraph>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGraph {
    pub slot: DateSlot,
    pub responses: Vec<ParticipantResponse>,
}

impl EventGraph {
    /// Slot timestamps, in slot order.
    pub fn timestamps(&self) -> Vec<i64> {
        self.slots.iter().map(|s| s.slot.timestamp_ms).collect()
    }

    pub fn slot_at(&self, timestamp_ms: i64) -> Option<&SlotGraph> {
        self.slots.iter().find(|s| s.slot.timestamp_ms == timestamp_ms)
    }

    /// Every name that answered at least one slot.
    pub fn participant_names(&self) -> BTreeSet<&str> {
        self.slots
            .iter()
            .flat_map(|s| s.responses.iter().map(|r| r.name.as_str()))
            .collect()
    }

    pub fn has_participant(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.responses.iter().any(|r| r.name == name))
    }

    /// Timestamps `name` marked themselves available for.
    pub fn availability_of(&self, name: &str) -> Vec<i64> {
        self.slots
            .iter()
            .filter(|s| s.responses.iter().any(|r| r.name == name && r.available))
            .map(|s| s.slot.timestamp_ms)
            .collect()
    }
}
