//! Error types shared by the webhook pipelines.
//!
//! Errors fall into five groups:
//! - [`ConfigError`]: fatal at startup, the server never binds
//! - [`TransportError`]: wrong method or oversized/unreadable body
//! - [`VerificationError`]: signature or timestamp rejected
//! - [`EventError`]: a verified event that could not be turned into a typed payload
//! - [`WebhookError`]: what a request handler reports, mapped to an HTTP status
//!
//! [`QueueError`] covers the hand-off from the HTTP path to the worker.

use axum::http::StatusCode;
use thiserror::Error;

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing webhook secret: {0}")]
    MissingSecret(&'static str),

    #[error("invalid webhook secret {name}: {reason}")]
    InvalidSecret { name: &'static str, reason: String },

    #[error("unknown event family: {0}")]
    UnknownEventFamily(String),

    #[error("invalid route path {name}: {value:?}")]
    InvalidPath { name: &'static str, value: String },
}

/// Request rejected before any signature check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("invalid request method: {0}")]
    MethodNotAllowed(String),

    #[error("request body too large (limit {limit} bytes)")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    BodyRead(String),
}

impl TransportError {
    pub fn status(&self) -> StatusCode {
        match self {
            TransportError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            TransportError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            TransportError::BodyRead(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Signature or freshness check failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("missing header: {0}")]
    MissingHeader(&'static str),

    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    #[error("invalid timestamp")]
    InvalidTimestamp,

    #[error("timestamp too old")]
    TimestampTooOld,

    #[error("timestamp too new")]
    TimestampTooNew,

    #[error("no signatures found")]
    NoSignatures,

    #[error("no matching signature found")]
    SignatureMismatch,
}

/// A verified event that produced no typed payload.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("unhandled event type: {0}")]
    Unhandled(String),

    #[error("failed to decode {event_type} payload: {source}")]
    Decode {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}

impl EventError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EventError::Unhandled(_) => "unhandled",
            EventError::Decode { .. } => "decode",
        }
    }
}

/// Errors reported by the request-level entry points.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl WebhookError {
    /// HTTP status the handler should answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::Transport(e) => e.status(),
            WebhookError::Verification(_) | WebhookError::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Response status label, also used as a log field.
    pub fn label(&self) -> &'static str {
        match self {
            WebhookError::Transport(TransportError::MethodNotAllowed(_)) => "method_not_allowed",
            WebhookError::Transport(TransportError::PayloadTooLarge { .. }) => "payload_too_large",
            WebhookError::Transport(TransportError::BodyRead(_)) => "bad_request",
            WebhookError::Verification(_) => "invalid_signature",
            WebhookError::Malformed(_) => "malformed_payload",
        }
    }
}

/// Event could not be handed to the worker.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("event queue is full")]
    Full,

    #[error("event queue is closed")]
    Closed,
}
