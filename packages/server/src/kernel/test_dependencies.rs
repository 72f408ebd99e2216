// TestDependencies - mock implementations for testing
//
// Provides a spy notifier that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

use super::{BaseChangeNotifier, ServerDeps};
use crate::domains::meetups::events::MeetupEvent;

// =============================================================================
// Spy Notifier
// =============================================================================

/// Records every published event. Optionally fails every publish, to check
/// that notifier errors never undo a mutation.
#[derive(Clone, Default)]
pub struct SpyNotifier {
    published: Arc<Mutex<Vec<MeetupEvent>>>,
    fail: bool,
}

impl SpyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A spy whose publish always errors (events are still recorded).
    pub fn failing() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<MeetupEvent> {
        self.published.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(MeetupEvent::kind).collect()
    }

    pub fn clear(&self) {
        self.published.lock().unwrap().clear();
    }
}

#[async_trait]
impl BaseChangeNotifier for SpyNotifier {
    async fn publish(&self, event: MeetupEvent) -> Result<()> {
        self.published.lock().unwrap().push(event);
        if self.fail {
            return Err(anyhow!("spy notifier configured to fail"));
        }
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// ServerDeps wired to a spy, plus a handle on the spy.
pub struct TestDependencies {
    pub deps: ServerDeps,
    pub notifier: SpyNotifier,
}

impl TestDependencies {
    pub fn new(db_pool: PgPool) -> Self {
        Self::with_notifier(db_pool, SpyNotifier::new())
    }

    pub fn with_notifier(db_pool: PgPool, notifier: SpyNotifier) -> Self {
        let deps = ServerDeps::new(db_pool, Arc::new(notifier.clone()));
        Self { deps, notifier }
    }
}
