//! Hookline - verified webhook receiver for Resend and Stripe.
//!
//! This library provides the modules behind the `hookline-server` binary:
//! - `verify`: Svix and Stripe signature schemes behind one `Verifier` trait
//! - `resend`, `stripe`: payload models and request-level entry points
//! - `web`: axum handlers that verify and enqueue
//! - `worker`: background decoding through the Stripe prefix router
//!
//! ## Architecture
//!
//! ```text
//! Webhooks → Web Server → event queue → Worker → EventHandler
//! ```

pub mod config;
pub mod error;
pub mod process;
pub mod queue;
pub mod resend;
pub mod stripe;
pub mod verify;
pub mod web;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, EventError, QueueError, VerificationError, WebhookError};
pub use process::{process_event, DecodedEvent, EventHandler, LogHandler};
pub use queue::{InboundEvent, Publisher};
pub use stripe::{EventFamily, EventRouter, TypedPayload};
pub use verify::{StripeVerifier, SvixVerifier, Verifier};
pub use web::AppState;
