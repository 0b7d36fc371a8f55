//! Stripe event envelope.
//!
//! Only the envelope is parsed up front. `data.object` stays raw JSON until the
//! dispatch table picks a schema from the event type.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A verified Stripe event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Event {
    /// Unique event identifier (evt_...)
    pub id: String,

    /// Dot-delimited event type, e.g. `invoice.payment_failed`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created
    #[serde(default)]
    pub created: i64,

    #[serde(default)]
    pub livemode: bool,

    /// API version used to render `data.object`
    pub api_version: Option<String>,

    /// Connected account the event belongs to, if any
    pub account: Option<String>,

    #[serde(default)]
    pub pending_webhooks: i64,

    pub request: Option<EventRequest>,

    pub data: EventData,
}

/// Event payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventData {
    /// The affected object, undecoded
    pub object: Box<RawValue>,

    /// Previous values of changed fields (`*.updated` events)
    pub previous_attributes: Option<serde_json::Value>,
}

/// API request that triggered the event.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EventRequest {
    pub id: Option<String>,
    pub idempotency_key: Option<String>,
}

impl Event {
    /// Parse an event envelope from a verified request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Raw JSON of `data.object`.
    pub fn raw_payload(&self) -> &[u8] {
        self.data.object.get().as_bytes()
    }
}
