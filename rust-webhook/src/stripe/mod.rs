//! Stripe webhooks: envelope, typed objects and the decoder table.

pub mod dispatch;
pub mod event;
pub mod objects;
pub mod webhook;

pub use dispatch::{EventFamily, EventRouter, TypedPayload};
pub use event::{Event, EventData, EventRequest};
pub use webhook::{handle_request, read_body, MAX_BODY_BYTES};
