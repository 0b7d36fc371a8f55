//! Decoding of queued webhooks into typed events.
//!
//! ## Processing Flow
//!
//! ```text
//! InboundEvent → process_event() → DecodedEvent → EventHandler
//! ```

pub mod handler;

use tracing::debug;

use crate::error::EventError;
use crate::queue::InboundEvent;
use crate::resend::{self, ResendEvent};
use crate::stripe::{EventRouter, TypedPayload};

pub use handler::{EventHandler, LogHandler};

/// A fully decoded webhook.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    Resend(ResendEvent),
    Stripe {
        event_id: String,
        event_type: String,
        payload: TypedPayload,
    },
}

impl DecodedEvent {
    pub fn provider(&self) -> &'static str {
        match self {
            DecodedEvent::Resend(_) => "resend",
            DecodedEvent::Stripe { .. } => "stripe",
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            DecodedEvent::Resend(e) => e.event_type().as_str(),
            DecodedEvent::Stripe { event_type, .. } => event_type,
        }
    }
}

/// Decode a queued webhook.
///
/// Resend events dispatch on their type; Stripe events go through `router`.
pub fn process_event(event: &InboundEvent, router: &EventRouter) -> Result<DecodedEvent, EventError> {
    debug!(
        provider = event.provider(),
        event_id = %event.id(),
        event_type = %event.event_type(),
        "event_process_start"
    );

    match event {
        InboundEvent::Resend(payload) => resend::process_payload(payload).map(DecodedEvent::Resend),
        InboundEvent::Stripe(ev) => router.decode(ev).map(|payload| DecodedEvent::Stripe {
            event_id: ev.id.clone(),
            event_type: ev.event_type.clone(),
            payload,
        }),
    }
}
