use thiserror::Error;
use uuid::Uuid;

use super::token::TokenError;

pub type Result<T, E = MeetupError> = std::result::Result<T, E>;

/// Every failure the meetup core reports.
///
/// Validation errors are raised before the store is touched. `NotFound` is
/// kept apart from `Store` so the boundary can answer "not found" instead of
/// a generic failure.
#[derive(Error, Debug)]
pub enum MeetupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Malformed input, rejected without a store round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid {kind} token: {source}")]
    InvalidToken {
        kind: &'static str,
        #[source]
        source: TokenError,
    },

    #[error("no dates selected")]
    NoDates,

    #[error("invalid date {0}")]
    InvalidDate(i64),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("the participant name is empty")]
    EmptyName,

    #[error("participant responses are not accepted when saving an event")]
    UnexpectedResponses,

    #[error("payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("invalid json: {0}")]
    InvalidJson(String),
}

/// A lookup that matched nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("no rows matching the owner token")]
    OwnerToken,

    #[error("no rows matching the participant token")]
    ParticipantToken,

    #[error("no {entity} row with id {id}")]
    Row { entity: &'static str, id: Uuid },
}

/// A failure inside the store. Always logged in full, never shown to users.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{stage}: {source}")]
    Database {
        stage: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{original}; rollback also failed: {rollback}")]
    RollbackFailed {
        #[source]
        original: Box<MeetupError>,
        rollback: sqlx::Error,
    },

    #[error("{stage}: {detail}")]
    Inconsistent { stage: &'static str, detail: String },
}

impl MeetupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MeetupError::NotFound(_))
    }

    /// Text that is safe to hand back across the boundary.
    pub fn public_message(&self) -> String {
        match self {
            MeetupError::Validation(e) => e.to_string(),
            MeetupError::NotFound(NotFound::OwnerToken) => "owner token not found.".to_string(),
            MeetupError::NotFound(NotFound::ParticipantToken) => {
                "The meetup was not found.".to_string()
            }
            // A numeric id miss means the graph changed under us
            MeetupError::NotFound(NotFound::Row { .. }) | MeetupError::Store(_) => {
                "database error.".to_string()
            }
        }
    }
}

/// Tags a raw sqlx failure with the step that produced it.
pub trait StageExt<T> {
    fn stage(self, stage: &'static str) -> Result<T>;
}

impl<T> StageExt<T> for std::result::Result<T, sqlx::Error> {
    fn stage(self, stage: &'static str) -> Result<T> {
        self.map_err(|source| StoreError::Database { stage, source }.into())
    }
}
