//! Change notifier implementations.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use super::BaseChangeNotifier;
use crate::domains::meetups::events::MeetupEvent;
use crate::domains::meetups::notifications;

// =============================================================================
// ChannelNotifier - hands events to an out-of-band delivery worker
// =============================================================================

/// Queues events on an unbounded channel. The receiver side is drained by a
/// delivery worker outside the core.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<MeetupEvent>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MeetupEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl BaseChangeNotifier for ChannelNotifier {
    async fn publish(&self, event: MeetupEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|e| anyhow!("notification receiver dropped, lost {}", e.0.kind()))
    }
}

// =============================================================================
// LoggingNotifier - renders and logs, sends nothing
// =============================================================================

/// Development notifier: logs the email each event would produce.
pub struct LoggingNotifier {
    hostname: String,
}

impl LoggingNotifier {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }
}

#[async_trait]
impl BaseChangeNotifier for LoggingNotifier {
    async fn publish(&self, event: MeetupEvent) -> Result<()> {
        match notifications::render(&event, &self.hostname) {
            Some(mail) => info!(
                kind = event.kind(),
                to = %mail.to,
                subject = %mail.subject,
                "notification email rendered"
            ),
            None => info!(kind = event.kind(), "change event without email"),
        }
        Ok(())
    }
}
