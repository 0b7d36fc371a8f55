//! Messages handed from the web server to the worker.

use crate::resend::Payload;
use crate::stripe::Event;

/// A verified webhook waiting to be decoded.
///
/// The web server only verifies and parses the envelope, so it can answer the
/// provider right away. Decoding happens on the worker.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    Resend(Payload),
    Stripe(Event),
}

impl InboundEvent {
    pub fn provider(&self) -> &'static str {
        match self {
            InboundEvent::Resend(_) => "resend",
            InboundEvent::Stripe(_) => "stripe",
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            InboundEvent::Resend(p) => p.event_type.as_str(),
            InboundEvent::Stripe(e) => e.event_type(),
        }
    }

    /// Provider-side identifier for log correlation.
    ///
    /// Resend payloads carry no event id, so the email or contact id is used.
    pub fn id(&self) -> &str {
        match self {
            InboundEvent::Resend(p) if !p.data.email_id.is_empty() => &p.data.email_id,
            InboundEvent::Resend(p) => &p.data.id,
            InboundEvent::Stripe(e) => &e.id,
        }
    }
}
