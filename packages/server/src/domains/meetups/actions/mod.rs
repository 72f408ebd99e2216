//! Meetup entry points.
//!
//! Each action takes an already-decoded request, validates it before any
//! store access, runs the matching activity, and after a successful commit
//! publishes exactly one change event.

pub mod delete_event;
pub mod fetch_event;
pub mod respond;
pub mod save_event;

pub use delete_event::delete_event;
pub use fetch_event::{get_owner_view, get_participant_view};
pub use respond::{delete_response, save_response};
pub use save_event::save_event;

use tracing::{debug, error, info};

use crate::common::MeetupError;

/// Store failures are logged in full here; callers only ever see
/// `public_message`.
pub(crate) fn log_failure(action: &'static str, err: &MeetupError) {
    match err {
        MeetupError::Validation(e) => debug!(action, error = %e, "request rejected"),
        MeetupError::NotFound(e) => info!(action, error = %e, "lookup matched nothing"),
        MeetupError::Store(e) => error!(action, error = ?e, "store failure"),
    }
}
