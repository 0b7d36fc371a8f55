//! In-process publisher for verified webhooks.
//!
//! A bounded channel sits between the HTTP handlers and the worker. Publishing
//! never waits: when the worker falls behind, the request fails and the
//! provider redelivers later.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::info;

use super::types::InboundEvent;
use crate::error::QueueError;

/// Cloneable handle for enqueueing inbound events.
#[derive(Debug, Clone)]
pub struct Publisher {
    sender: mpsc::Sender<InboundEvent>,
}

impl Publisher {
    /// Create a publisher and the receiver the worker drains.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<InboundEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Enqueue an event without waiting for capacity.
    pub fn publish(&self, event: InboundEvent) -> Result<(), QueueError> {
        let provider = event.provider();
        let event_id = event.id().to_string();

        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => QueueError::Full,
            TrySendError::Closed(_) => QueueError::Closed,
        })?;

        info!(
            provider = provider,
            event_id = %event_id,
            queue_remaining = self.sender.capacity(),
            "event_enqueued"
        );

        Ok(())
    }
}
