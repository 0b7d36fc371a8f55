//! Resend webhooks, delivered through Svix.

pub mod model;
pub mod webhook;

pub use model::{Bounce, Click, ContactEvent, Data, EmailEvent, EventType, Payload, ResendEvent};
pub use webhook::{handle_request, process_payload};
