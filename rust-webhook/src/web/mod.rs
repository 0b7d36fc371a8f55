//! Web server module for handling inbound webhooks.
//!
//! This module provides a thin, fast web server that:
//! - Receives webhooks from Resend and Stripe
//! - Verifies signatures
//! - Immediately enqueues verified events for the worker
//!
//! Typed decoding happens in the background worker.

pub mod handlers;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, resend_webhook, stripe_webhook, AppState, HealthResponse, WebhookResponse,
};

/// Build the HTTP router.
///
/// Webhook routes accept every method so the handlers can answer 405 themselves.
pub fn router(state: AppState) -> Router {
    let resend_path = state.config.resend_webhook_path.clone();
    let stripe_path = state.config.stripe_webhook_path.clone();

    Router::new()
        .route("/health", get(health))
        .route(&resend_path, any(resend_webhook))
        .route(&stripe_path, any(stripe_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
