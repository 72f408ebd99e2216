use sqlx::PgPool;
use tracing::info;

use crate::common::{NotFound, OwnerToken, Result};
use crate::domains::meetups::models::Event;

/// Remove an event and, through the foreign keys, its owner record, slots
/// and responses.
///
/// A single statement, so the storage engine makes it atomic without an
/// explicit transaction. An owner token that matches nothing is reported as
/// not found.
pub async fn delete_event_cascade(token: &OwnerToken, pool: &PgPool) -> Result<()> {
    let removed = Event::delete_by_owner_token(token, pool).await?;
    if removed == 0 {
        return Err(NotFound::OwnerToken.into());
    }
    info!("event deleted");
    Ok(())
}
