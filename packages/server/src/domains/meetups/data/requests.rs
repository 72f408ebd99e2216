use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::common::ValidationError;

/// Cap for create/update/respond bodies.
pub const MAX_MUTATION_BYTES: usize = 4096;

/// Cap for fetch/delete bodies.
pub const MAX_QUERY_BYTES: usize = 512;

/// Create (no owner token) or update (owner token present) an event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEventRequest {
    #[serde(default)]
    pub owner_token: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub alert_on_change: Option<bool>,
    #[serde(default)]
    pub dates: Vec<i64>,
    /// Must be empty; responses are only written through the participant
    /// token.
    #[serde(default)]
    pub users: Vec<serde_json::Value>,
}

impl SaveEventRequest {
    /// An empty owner token means "create", same as an absent one.
    pub fn owner_token(&self) -> Option<&str> {
        self.owner_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerTokenRequest {
    pub owner_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantTokenRequest {
    #[serde(rename = "userToken")]
    pub participant_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponseRequest {
    #[serde(rename = "userToken")]
    pub participant_token: String,
    pub participant_name: String,
    /// Timestamps the participant can make.
    #[serde(default)]
    pub dates: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponseRequest {
    #[serde(rename = "userToken")]
    pub participant_token: String,
    pub participant_name: String,
}

pub fn decode_mutation<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    decode_bounded(body, MAX_MUTATION_BYTES)
}

pub fn decode_query<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    decode_bounded(body, MAX_QUERY_BYTES)
}

fn decode_bounded<T: DeserializeOwned>(body: &[u8], limit: usize) -> Result<T, ValidationError> {
    if body.len() > limit {
        return Err(ValidationError::PayloadTooLarge { limit });
    }
    serde_json::from_slice(body).map_err(|e| ValidationError::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_event_decodes_camel_case_keys() {
        let body = br#"{
            "ownerToken": "",
            "description": "team lunch",
            "contact": "testy@testy.test",
            "alertOnChange": true,
            "dates": [1549537200000, 1549623600000]
        }"#;
        let req: SaveEventRequest = decode_mutation(body).unwrap();
        assert_eq!(req.owner_token(), None);
        assert_eq!(req.description, "team lunch");
        assert_eq!(req.alert_on_change, Some(true));
        assert_eq!(req.dates, vec![1549537200000, 1549623600000]);
        assert!(req.users.is_empty());
    }

    #[test]
    fn test_participant_requests_use_user_token_key() {
        let req: SaveResponseRequest = decode_mutation(
            br#"{"userToken": "abc", "participantName": "user1", "dates": [1]}"#,
        )
        .unwrap();
        assert_eq!(req.participant_token, "abc");
        assert_eq!(req.participant_name, "user1");

        let req: ParticipantTokenRequest = decode_query(br#"{"userToken": "abc"}"#).unwrap();
        assert_eq!(req.participant_token, "abc");
    }

    #[test]
    fn test_oversized_bodies_rejected_before_decoding() {
        let body = vec![b' '; MAX_QUERY_BYTES + 1];
        let err = decode_query::<OwnerTokenRequest>(&body).unwrap_err();
        assert_eq!(err, ValidationError::PayloadTooLarge { limit: 512 });

        let body = vec![b' '; MAX_MUTATION_BYTES + 1];
        let err = decode_mutation::<SaveEventRequest>(&body).unwrap_err();
        assert_eq!(err, ValidationError::PayloadTooLarge { limit: 4096 });
    }

    #[test]
    fn test_malformed_json_reported() {
        let err = decode_query::<OwnerTokenRequest>(b"{not json").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidJson(_)));
    }
}
