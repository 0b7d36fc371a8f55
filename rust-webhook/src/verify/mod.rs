//! Webhook signature verification.
//!
//! Both providers sign with HMAC-SHA256 but differ in header layout and in
//! what is signed:
//! - Resend (Svix): `svix-id`, `svix-timestamp`, `svix-signature`, base64 digest
//!   of `{id}.{timestamp}.{body}`
//! - Stripe: `Stripe-Signature: t=...,v1=...`, hex digest of `{t}.{body}`
//!
//! Handlers only see the [`Verifier`] trait so tests can swap in fixtures.

pub mod stripe;
pub mod svix;

use axum::http::HeaderMap;

use crate::error::VerificationError;

pub use self::stripe::StripeVerifier;
pub use self::svix::SvixVerifier;

/// Default tolerance for signature timestamps, in seconds.
pub const DEFAULT_TOLERANCE_SECS: u64 = 300;

/// Checks authenticity and freshness of a raw webhook request.
pub trait Verifier: Send + Sync {
    /// Verify `body` against the signature headers as of `now` (unix seconds).
    fn verify_at(
        &self,
        body: &[u8],
        headers: &HeaderMap,
        now: i64,
    ) -> Result<(), VerificationError>;

    /// Verify `body` against the signature headers using the system clock.
    fn verify(&self, body: &[u8], headers: &HeaderMap) -> Result<(), VerificationError> {
        self.verify_at(body, headers, chrono::Utc::now().timestamp())
    }
}

/// Read a header as UTF-8, treating undecodable values as missing.
pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
