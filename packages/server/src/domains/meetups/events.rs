use serde::Serialize;

use crate::common::{OwnerToken, ParticipantToken};
use crate::domains::meetups::models::EventGraph;

/// Owner contact snapshot taken at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerContact {
    pub email: String,
    pub alerts: bool,
}

/// Meetup events - facts about committed changes.
///
/// Exactly one is published per successful mutation, after commit. Errors
/// go in Result::Err, not in events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeetupEvent {
    EventCreated {
        owner_token: OwnerToken,
        participant_token: ParticipantToken,
        contact: OwnerContact,
    },

    EventUpdated {
        owner_token: OwnerToken,
        participant_token: ParticipantToken,
        contact: OwnerContact,
        removed_dates: Vec<i64>,
        ignored_dates: Vec<i64>,
    },

    EventDeleted { owner_token: OwnerToken },

    ParticipantAdded {
        participant_token: ParticipantToken,
        name: String,
        contact: OwnerContact,
    },

    ParticipantChanged {
        participant_token: ParticipantToken,
        name: String,
        contact: OwnerContact,
    },

    ParticipantRemoved {
        participant_token: ParticipantToken,
        name: String,
        contact: OwnerContact,
    },
}

impl MeetupEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            MeetupEvent::EventCreated { .. } => "event_created",
            MeetupEvent::EventUpdated { .. } => "event_updated",
            MeetupEvent::EventDeleted { .. } => "event_deleted",
            MeetupEvent::ParticipantAdded { .. } => "participant_added",
            MeetupEvent::ParticipantChanged { .. } => "participant_changed",
            MeetupEvent::ParticipantRemoved { .. } => "participant_removed",
        }
    }
}

impl From<&EventGraph> for OwnerContact {
    fn from(graph: &EventGraph) -> Self {
        Self {
            email: graph.owner.email.clone(),
            alerts: graph.owner.alerts,
        }
    }
}
