//! Svix webhook signature verification (used by Resend).
//!
//! Reference: https://docs.svix.com/receiving/verifying-payloads/how-manual

use axum::http::HeaderMap;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

use super::{header_str, Verifier, DEFAULT_TOLERANCE_SECS};
use crate::error::{ConfigError, VerificationError};

type HmacSha256 = Hmac<Sha256>;

const SECRET_PREFIX: &str = "whsec_";
const SIGNATURE_VERSION: &str = "v1";

/// Header triples accepted for the message id, timestamp and signature.
/// The unbranded `webhook-*` names are the fallback.
const HEADER_SETS: [(&str, &str, &str); 2] = [
    ("svix-id", "svix-timestamp", "svix-signature"),
    ("webhook-id", "webhook-timestamp", "webhook-signature"),
];

/// Verifier for Svix-signed webhooks.
///
/// Built once at startup from the endpoint secret and shared read-only.
#[derive(Clone)]
pub struct SvixVerifier {
    mac: HmacSha256,
    tolerance_secs: i64,
}

impl std::fmt::Debug for SvixVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvixVerifier")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish_non_exhaustive()
    }
}

impl SvixVerifier {
    /// Create a verifier from a `whsec_<base64>` secret (prefix optional).
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        let encoded = secret.trim();
        let encoded = encoded.strip_prefix(SECRET_PREFIX).unwrap_or(encoded);
        if encoded.is_empty() {
            return Err(ConfigError::InvalidSecret {
                name: crate::config::RESEND_SECRET_VAR,
                reason: "secret is empty".to_string(),
            });
        }

        let key = STANDARD
            .decode(encoded)
            .map_err(|e| ConfigError::InvalidSecret {
                name: crate::config::RESEND_SECRET_VAR,
                reason: e.to_string(),
            })?;

        let mac = HmacSha256::new_from_slice(&key).map_err(|e| ConfigError::InvalidSecret {
            name: crate::config::RESEND_SECRET_VAR,
            reason: e.to_string(),
        })?;

        Ok(Self {
            mac,
            tolerance_secs: DEFAULT_TOLERANCE_SECS as i64,
        })
    }

    /// Override the timestamp tolerance.
    pub fn with_tolerance(mut self, tolerance_secs: u64) -> Self {
        self.tolerance_secs = i64::try_from(tolerance_secs).unwrap_or(i64::MAX);
        self
    }

    /// Produce a `v1,<base64>` signature header value for a message.
    pub fn sign(&self, msg_id: &str, timestamp: i64, body: &[u8]) -> String {
        format!(
            "{},{}",
            SIGNATURE_VERSION,
            STANDARD.encode(self.compute(msg_id, timestamp, body))
        )
    }

    fn compute(&self, msg_id: &str, timestamp: i64, body: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(msg_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }
}

impl Verifier for SvixVerifier {
    fn verify_at(
        &self,
        body: &[u8],
        headers: &HeaderMap,
        now: i64,
    ) -> Result<(), VerificationError> {
        let (id_name, ts_name, sig_name) = HEADER_SETS
            .iter()
            .copied()
            .find(|(id, _, _)| header_str(headers, id).is_some())
            .unwrap_or(HEADER_SETS[0]);

        let msg_id =
            header_str(headers, id_name).ok_or(VerificationError::MissingHeader("svix-id"))?;
        let timestamp_raw = header_str(headers, ts_name)
            .ok_or(VerificationError::MissingHeader("svix-timestamp"))?;
        let signatures = header_str(headers, sig_name)
            .ok_or(VerificationError::MissingHeader("svix-signature"))?;

        let timestamp: i64 = timestamp_raw.parse().map_err(|_| {
            warn!(timestamp = %timestamp_raw, "svix_signature_invalid_timestamp");
            VerificationError::InvalidTimestamp
        })?;

        if now.saturating_sub(timestamp) > self.tolerance_secs {
            warn!(
                webhook_time = timestamp,
                current_time = now,
                "svix_signature_stale"
            );
            return Err(VerificationError::TimestampTooOld);
        }
        if timestamp.saturating_sub(now) > self.tolerance_secs {
            warn!(
                webhook_time = timestamp,
                current_time = now,
                "svix_signature_from_future"
            );
            return Err(VerificationError::TimestampTooNew);
        }

        let expected = STANDARD.encode(self.compute(msg_id, timestamp, body));

        let mut seen_v1 = false;
        for entry in signatures.split(' ') {
            let Some((version, signature)) = entry.split_once(',') else {
                continue;
            };
            if version != SIGNATURE_VERSION {
                continue;
            }
            seen_v1 = true;
            if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
                return Ok(());
            }
        }

        if !seen_v1 {
            warn!(msg_id = %msg_id, "svix_signature_no_v1");
            return Err(VerificationError::NoSignatures);
        }

        warn!(msg_id = %msg_id, "svix_signature_mismatch");
        Err(VerificationError::SignatureMismatch)
    }
}
