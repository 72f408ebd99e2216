// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BaseChangeNotifier)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::meetups::events::MeetupEvent;

// =============================================================================
// Change Notifier Trait (Infrastructure)
// =============================================================================

/// Receives one event per committed mutation.
///
/// Implementations hand the event to whatever delivers notifications; they
/// own delivery guarantees and retries. A returned error is logged by the
/// caller and never undoes the mutation.
#[async_trait]
pub trait BaseChangeNotifier: Send + Sync {
    async fn publish(&self, event: MeetupEvent) -> Result<()>;
}
