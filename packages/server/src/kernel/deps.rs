//! Server dependencies (using traits for testability)
//!
//! This module provides the dependency container handed to every meetup
//! action. It is built once at startup and passed explicitly; there is no
//! process-global store or statement registry.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use crate::domains::meetups::events::MeetupEvent;
use crate::kernel::BaseChangeNotifier;

// =============================================================================
// ServerDeps
// =============================================================================

#[derive(Clone)]
pub struct ServerDeps {
    /// Shared connection pool, safe for concurrent use
    pub db_pool: PgPool,
    pub notifier: Arc<dyn BaseChangeNotifier>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, notifier: Arc<dyn BaseChangeNotifier>) -> Self {
        Self { db_pool, notifier }
    }

    /// Publish a committed change. Notifier failures are logged and dropped;
    /// the mutation already happened.
    pub async fn notify(&self, event: MeetupEvent) {
        let kind = event.kind();
        if let Err(e) = self.notifier.publish(event).await {
            warn!(kind, error = %e, "failed to publish change event");
        }
    }
}
