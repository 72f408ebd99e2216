use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::common::MeetupError;
use crate::domains::meetups::models::{EventGraph, SlotGraph};

/// The two links handed to an organizer after saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    #[serde(rename = "userToken")]
    pub participant_token: String,
    pub owner_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseView {
    pub name: String,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateView {
    pub date: i64,
    pub users: Vec<ResponseView>,
}

/// What a participant-token holder sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantView {
    pub description: String,
    pub dates: Vec<DateView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminView {
    pub email: String,
    pub alerts: bool,
}

/// What the owner sees: the participant view plus contact settings and the
/// shareable participant token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    #[serde(rename = "userToken")]
    pub participant_token: String,
    pub description: String,
    pub dates: Vec<DateView>,
    pub admin: AdminView,
}

impl From<&SlotGraph> for DateView {
    fn from(slot: &SlotGraph) -> Self {
        Self {
            date: slot.slot.timestamp_ms,
            users: slot
                .responses
                .iter()
                .map(|r| ResponseView {
                    name: r.name.clone(),
                    available: r.available,
                })
                .collect(),
        }
    }
}

impl From<&EventGraph> for ParticipantView {
    fn from(graph: &EventGraph) -> Self {
        Self {
            description: graph.event.description.clone(),
            dates: graph.slots.iter().map(DateView::from).collect(),
        }
    }
}

impl From<&EventGraph> for OwnerView {
    fn from(graph: &EventGraph) -> Self {
        Self {
            participant_token: graph.event.participant_token.to_string(),
            description: graph.event.description.clone(),
            dates: graph.slots.iter().map(DateView::from).collect(),
            admin: AdminView {
                email: graph.owner.email.clone(),
                alerts: graph.owner.alerts,
            },
        }
    }
}

impl From<&EventGraph> for TokenPair {
    fn from(graph: &EventGraph) -> Self {
        Self {
            participant_token: graph.event.participant_token.to_string(),
            owner_token: graph.event.owner_token.to_string(),
        }
    }
}

/// `{"result": <value>, "error": ""}` on success,
/// `{"result": "", "error": <message>}` on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            result: Some(result),
            error: String::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: message.into(),
        }
    }

    /// Maps failures to their public message; internals stay in the logs.
    pub fn from_result(result: Result<T, MeetupError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => Self::error(e.public_message()),
        }
    }
}

impl ApiResponse<()> {
    /// Success with nothing to return.
    pub fn empty() -> Self {
        Self {
            result: None,
            error: String::new(),
        }
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ApiResponse", 2)?;
        match &self.result {
            Some(value) => s.serialize_field("result", value)?,
            None => s.serialize_field("result", "")?,
        }
        s.serialize_field("error", &self.error)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{NotFound, StoreError};
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let pair = TokenPair {
            participant_token: "u".to_string(),
            owner_token: "o".to_string(),
        };
        let value = serde_json::to_value(ApiResponse::ok(pair)).unwrap();
        assert_eq!(
            value,
            json!({"result": {"userToken": "u", "ownerToken": "o"}, "error": ""})
        );
    }

    #[test]
    fn test_empty_and_error_envelopes() {
        assert_eq!(
            serde_json::to_value(ApiResponse::empty()).unwrap(),
            json!({"result": "", "error": ""})
        );
        assert_eq!(
            serde_json::to_value(ApiResponse::<TokenPair>::error("invalid json")).unwrap(),
            json!({"result": "", "error": "invalid json"})
        );
    }

    #[test]
    fn test_from_result_hides_store_detail() {
        let err: MeetupError = StoreError::Inconsistent {
            stage: "verify reconciliation",
            detail: "secret internals".to_string(),
        }
        .into();
        let response = ApiResponse::<()>::from_result(Err(err));
        assert_eq!(response.error, "database error.");

        let response = ApiResponse::<()>::from_result(Err(NotFound::ParticipantToken.into()));
        assert_eq!(response.error, "The meetup was not found.");
    }
}
