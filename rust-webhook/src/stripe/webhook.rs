//! Request-level entry point for Stripe webhooks.
//!
//! Checks run cheapest first: method, body size, signature, envelope. The
//! body is buffered under a hard ceiling before the signature is ever looked
//! at, so oversized requests cost no HMAC work.

use axum::{
    body::{Body, Bytes},
    http::{header::CONTENT_LENGTH, HeaderMap, Method, StatusCode},
};
use http_body_util::LengthLimitError;

use super::event::Event;
use crate::error::{TransportError, WebhookError};
use crate::verify::Verifier;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 65_536;

/// Validate, verify and parse a Stripe webhook request.
///
/// On failure the error comes paired with the HTTP status to answer with.
pub async fn handle_request(
    verifier: &dyn Verifier,
    method: &Method,
    headers: &HeaderMap,
    body: Body,
    max_body_bytes: usize,
) -> Result<Event, (StatusCode, WebhookError)> {
    if *method != Method::POST {
        return Err(reject(TransportError::MethodNotAllowed(method.to_string())));
    }

    let body = read_body(headers, body, max_body_bytes)
        .await
        .map_err(reject)?;

    verifier.verify(&body, headers).map_err(reject)?;

    Event::from_slice(&body).map_err(reject)
}

/// Buffer a request body, refusing anything over `limit` bytes.
///
/// A declared `Content-Length` over the limit is refused without reading.
pub async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Bytes, TransportError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    if matches!(declared, Some(len) if len > limit as u64) {
        return Err(TransportError::PayloadTooLarge { limit });
    }

    axum::body::to_bytes(body, limit).await.map_err(|e| {
        if is_length_limit(&e) {
            TransportError::PayloadTooLarge { limit }
        } else {
            TransportError::BodyRead(e.to_string())
        }
    })
}

fn is_length_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

fn reject<E: Into<WebhookError>>(err: E) -> (StatusCode, WebhookError) {
    let err = err.into();
    (err.status(), err)
}
