//! Webhook endpoint handlers.
//!
//! These handlers are designed to be extremely fast - they only:
//! 1. Verify the provider signature
//! 2. Enqueue the parsed envelope for the worker
//! 3. Return immediately
//!
//! Decoding into typed payloads happens in the background worker.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{ConfigError, TransportError, WebhookError};
use crate::queue::{InboundEvent, Publisher};
use crate::verify::{StripeVerifier, SvixVerifier, Verifier};
use crate::{resend, stripe, Config};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub publisher: Publisher,
    pub resend_verifier: Arc<dyn Verifier>,
    pub stripe_verifier: Arc<dyn Verifier>,
}

impl AppState {
    /// Build state with verifiers keyed from the configured secrets.
    pub fn new(config: Config, publisher: Publisher) -> Result<Self, ConfigError> {
        let tolerance = config.signature_tolerance_secs;
        let resend_verifier =
            SvixVerifier::new(&config.resend_webhook_secret)?.with_tolerance(tolerance);
        let stripe_verifier =
            StripeVerifier::new(&config.stripe_webhook_secret)?.with_tolerance(tolerance);

        Ok(Self::with_verifiers(
            config,
            publisher,
            Arc::new(resend_verifier),
            Arc::new(stripe_verifier),
        ))
    }

    /// Build state around caller-supplied verifiers.
    pub fn with_verifiers(
        config: Config,
        publisher: Publisher,
        resend_verifier: Arc<dyn Verifier>,
        stripe_verifier: Arc<dyn Verifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            publisher,
            resend_verifier,
            stripe_verifier,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Responses
// =============================================================================

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

fn reject(status: StatusCode, label: &'static str) -> Response {
    (
        status,
        Json(WebhookResponse {
            status: label,
            event_id: None,
        }),
    )
        .into_response()
}

// =============================================================================
// Resend Webhook
// =============================================================================

/// Resend webhook endpoint.
///
/// This endpoint:
/// 1. Verifies the Svix signature headers
/// 2. Enqueues the payload
/// 3. Returns 204 No Content
///
/// A payload that verifies but does not parse is acknowledged anyway, since
/// redelivering it would not change the outcome.
pub async fn resend_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        let err = WebhookError::from(TransportError::MethodNotAllowed(method.to_string()));
        warn!(provider = "resend", method = %method, "resend_method_not_allowed");
        return reject(err.status(), err.label());
    }

    info!(
        provider = "resend",
        body_length = body.len(),
        has_svix_id = headers.contains_key("svix-id") || headers.contains_key("webhook-id"),
        "resend_webhook_received"
    );

    let payload = match resend::handle_request(state.resend_verifier.as_ref(), &headers, &body) {
        Ok(payload) => payload,
        Err(WebhookError::Malformed(e)) => {
            error!(provider = "resend", error = %e, "resend_payload_malformed");
            return StatusCode::NO_CONTENT.into_response();
        }
        Err(e) => {
            warn!(provider = "resend", error = %e, reason = e.label(), "resend_webhook_rejected");
            return reject(e.status(), e.label());
        }
    };

    let event_type = payload.event_type.clone();
    if let Err(e) = state.publisher.publish(InboundEvent::Resend(payload)) {
        error!(provider = "resend", event_type = %event_type, error = %e, "resend_publish_failed");
        return reject(StatusCode::INTERNAL_SERVER_ERROR, "error");
    }

    info!(provider = "resend", event_type = %event_type, "resend_enqueued");

    StatusCode::NO_CONTENT.into_response()
}

// =============================================================================
// Stripe Webhook
// =============================================================================

/// Stripe webhook endpoint.
///
/// This endpoint:
/// 1. Refuses bodies over 64 KiB before touching the signature
/// 2. Verifies the `Stripe-Signature` header and parses the event envelope
/// 3. Enqueues the event and returns 200 OK
pub async fn stripe_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let event = match stripe::handle_request(
        state.stripe_verifier.as_ref(),
        &method,
        &headers,
        body,
        stripe::MAX_BODY_BYTES,
    )
    .await
    {
        Ok(event) => event,
        Err((status, e)) => {
            warn!(
                provider = "stripe",
                method = %method,
                status = status.as_u16(),
                error = %e,
                reason = e.label(),
                "stripe_webhook_rejected"
            );
            return reject(status, e.label());
        }
    };

    let event_id = event.id.clone();
    info!(
        provider = "stripe",
        event_id = %event_id,
        event_type = %event.event_type(),
        livemode = event.livemode,
        "stripe_webhook_received"
    );

    if let Err(e) = state.publisher.publish(InboundEvent::Stripe(event)) {
        error!(provider = "stripe", event_id = %event_id, error = %e, "stripe_publish_failed");
        return reject(StatusCode::INTERNAL_SERVER_ERROR, "error");
    }

    (
        StatusCode::OK,
        Json(WebhookResponse {
            status: "received",
            event_id: Some(event_id),
        }),
    )
        .into_response()
}
