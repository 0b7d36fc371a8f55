//! Background worker that decodes queued webhooks.
//!
//! Every event is decoded on its own task. Failures are logged and dropped:
//! the provider already got its acknowledgement, so there is nobody left to
//! report them to.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinSet};
use tracing::{error, info, warn};

use crate::error::EventError;
use crate::process::{process_event, EventHandler};
use crate::queue::InboundEvent;
use crate::stripe::EventRouter;

/// Drain `receiver` until every publisher is dropped, then wait for in-flight
/// tasks to finish.
pub async fn run(
    mut receiver: mpsc::Receiver<InboundEvent>,
    router: Arc<EventRouter>,
    handler: Arc<dyn EventHandler>,
) {
    info!("worker_started");

    let mut tasks = JoinSet::new();
    let mut processed: u64 = 0;

    loop {
        tokio::select! {
            event = receiver.recv() => {
                let Some(event) = event else { break };
                processed += 1;

                let router = Arc::clone(&router);
                let handler = Arc::clone(&handler);
                tasks.spawn(async move {
                    process_one(event, &router, handler.as_ref());
                });
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                log_join(joined);
            }
        }
    }

    info!(in_flight = tasks.len(), "worker_draining");
    while let Some(joined) = tasks.join_next().await {
        log_join(joined);
    }

    info!(processed = processed, "worker_stopped");
}

/// Decode one event and hand it to `handler`.
pub fn process_one(event: InboundEvent, router: &EventRouter, handler: &dyn EventHandler) {
    match process_event(&event, router) {
        Ok(decoded) => handler.handle(decoded),
        Err(e @ EventError::Unhandled(_)) => warn!(
            provider = event.provider(),
            event_id = %event.id(),
            event_type = %event.event_type(),
            error = %e,
            "event_unhandled"
        ),
        Err(e) => error!(
            provider = event.provider(),
            event_id = %event.id(),
            event_type = %event.event_type(),
            error = %e,
            error_kind = e.kind(),
            "event_decode_failed"
        ),
    }
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "worker_task_failed");
    }
}
