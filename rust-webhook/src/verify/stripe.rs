//! Stripe webhook signature verification.
//!
//! Stripe signs webhook requests using HMAC-SHA256.
//! Reference: https://docs.stripe.com/webhooks#verify-manually

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

use super::{header_str, Verifier, DEFAULT_TOLERANCE_SECS};
use crate::error::{ConfigError, VerificationError};

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the timestamp and signatures.
pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Parsed components of a `Stripe-Signature` header.
///
/// Format: `t=<timestamp>,v1=<hex>[,v1=<hex>...][,v0=<hex>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    /// All decodable v1 signatures; several are sent while a secret is rolled.
    pub signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parse a `Stripe-Signature` header value.
    pub fn parse(header: &str) -> Result<Self, VerificationError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or(VerificationError::MalformedHeader(SIGNATURE_HEADER))?;

            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse::<i64>()
                            .map_err(|_| VerificationError::InvalidTimestamp)?,
                    );
                }
                "v1" => {
                    // Undecodable entries are skipped, not fatal.
                    if let Ok(sig) = hex::decode(value) {
                        signatures.push(sig);
                    }
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(VerificationError::MalformedHeader(SIGNATURE_HEADER))?;
        if signatures.is_empty() {
            return Err(VerificationError::NoSignatures);
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Verifier for Stripe-signed webhooks.
#[derive(Clone)]
pub struct StripeVerifier {
    mac: HmacSha256,
    tolerance_secs: i64,
}

impl std::fmt::Debug for StripeVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeVerifier")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish_non_exhaustive()
    }
}

impl StripeVerifier {
    /// Create a verifier from the endpoint signing secret.
    ///
    /// The whole secret, `whsec_` prefix included, is the HMAC key.
    pub fn new(secret: &str) -> Result<Self, ConfigError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(ConfigError::InvalidSecret {
                name: crate::config::STRIPE_SECRET_VAR,
                reason: "secret is empty".to_string(),
            });
        }

        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            ConfigError::InvalidSecret {
                name: crate::config::STRIPE_SECRET_VAR,
                reason: e.to_string(),
            }
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

    /// Produce a `Stripe-Signature` header value for a payload.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        format!("t={},v1={}", timestamp, hex::encode(self.compute(timestamp, body)))
    }

    fn compute(&self, timestamp: i64, body: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }
}

impl Verifier for StripeVerifier {
    fn verify_at(
        &self,
        body: &[u8],
        headers: &HeaderMap,
        now: i64,
    ) -> Result<(), VerificationError> {
        let raw = header_str(headers, SIGNATURE_HEADER)
            .ok_or(VerificationError::MissingHeader(SIGNATURE_HEADER))?;

        let header = SignatureHeader::parse(raw).map_err(|e| {
            warn!(error = %e, "stripe_signature_header_invalid");
            e
        })?;

        let age = now.saturating_sub(header.timestamp);
        if age > self.tolerance_secs {
            warn!(
                webhook_time = header.timestamp,
                current_time = now,
                age_seconds = age,
                max_age_seconds = self.tolerance_secs,
                "stripe_signature_stale"
            );
            return Err(VerificationError::TimestampTooOld);
        }

        let expected = self.compute(header.timestamp, body);
        let valid = header
            .signatures
            .iter()
            .any(|sig| bool::from(expected.as_slice().ct_eq(sig.as_slice())));

        if !valid {
            warn!(
                candidates = header.signatures.len(),
                "stripe_signature_mismatch"
            );
            return Err(VerificationError::SignatureMismatch);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use proptest::prelude::*;

    const SECRET: &str = "whsec_test_secret_12345";
    const NOW: i64 = 1_704_067_200;
    const BODY: &[u8] = br#"{"id":"evt_1","type":"charge.succeeded","data":{"object":{"id":"ch_1","amount":500}}}"#;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("stripe-signature", HeaderValue::from_str(value).unwrap());
        headers
    }

    // =========================================================================
    // Header parsing
    // =========================================================================

    #[test]
    fn test_parse_header_v1_only() {
        let header = SignatureHeader::parse(&format!("t=1234567890,v1={}", "a".repeat(64))).unwrap();
        assert_eq!(header.timestamp, 1234567890);
        assert_eq!(header.signatures.len(), 1);
        assert_eq!(header.signatures[0].len(), 32);
    }

    #[test]
    fn test_parse_header_multiple_v1_and_v0() {
        let raw = format!(
            "t=1234567890,v1={},v1={},v0={}",
            "a".repeat(64),
            "b".repeat(64),
            "c".repeat(64)
        );
        let header = SignatureHeader::parse(&raw).unwrap();
        assert_eq!(header.signatures.len(), 2);
    }

    #[test]
    fn test_parse_header_skips_bad_hex() {
        let raw = format!("t=1234567890,v1=zzzz,v1={}", "a".repeat(64));
        let header = SignatureHeader::parse(&raw).unwrap();
        assert_eq!(header.signatures.len(), 1);
    }

    #[test]
    fn test_parse_header_errors() {
        assert_eq!(
            SignatureHeader::parse(&format!("v1={}", "a".repeat(64))),
            Err(VerificationError::MalformedHeader(SIGNATURE_HEADER))
        );
        assert_eq!(
            SignatureHeader::parse("t=1234567890"),
            Err(VerificationError::NoSignatures)
        );
        assert_eq!(
            SignatureHeader::parse("t=soon,v1=aa"),
            Err(VerificationError::InvalidTimestamp)
        );
        assert_eq!(
            SignatureHeader::parse("t1234567890"),
            Err(VerificationError::MalformedHeader(SIGNATURE_HEADER))
        );
    }

    // =========================================================================
    // Verification
    // =========================================================================

    #[test]
    fn test_new_rejects_empty_secret() {
        assert!(matches!(
            StripeVerifier::new("  "),
            Err(ConfigError::InvalidSecret { .. })
        ));
    }

    #[test]
    fn test_known_signature() {
        let verifier = StripeVerifier::new("whsec_test").unwrap();
        let header = verifier.sign(1_700_000_000, b"{}");
        assert_eq!(
            header,
            "t=1700000000,v1=35495024f4ef3f94e5a93e22221544c4b75e9a42300cd965ab81cb85cd994e91"
        );
    }

    #[test]
    fn test_verify_valid() {
        let verifier = StripeVerifier::new(SECRET).unwrap();
        let headers = headers_with(&verifier.sign(NOW, BODY));
        assert_eq!(verifier.verify_at(BODY, &headers, NOW), Ok(()));
    }

    #[test]
    fn test_verify_missing_header() {
        let verifier = StripeVerifier::new(SECRET).unwrap();
        assert_eq!(
            verifier.verify_at(BODY, &HeaderMap::new(), NOW),
            Err(VerificationError::MissingHeader(SIGNATURE_HEADER))
        );
    }

    #[test]
    fn test_verify_stale() {
        let verifier = StripeVerifier::new(SECRET).unwrap();

        let headers = headers_with(&verifier.sign(NOW - 301, BODY));
        assert_eq!(
            verifier.verify_at(BODY, &headers, NOW),
            Err(VerificationError::TimestampTooOld)
        );

        let headers = headers_with(&verifier.sign(NOW - 300, BODY));
        assert_eq!(verifier.verify_at(BODY, &headers, NOW), Ok(()));
    }

    #[test]
    fn test_verify_custom_tolerance() {
        let verifier = StripeVerifier::new(SECRET).unwrap().with_tolerance(5);
        let headers = headers_with(&verifier.sign(NOW - 6, BODY));
        assert_eq!(
            verifier.verify_at(BODY, &headers, NOW),
            Err(VerificationError::TimestampTooOld)
        );
    }

    #[test]
    fn test_verify_extreme_timestamps() {
        let verifier = StripeVerifier::new(SECRET).unwrap();

        let headers = headers_with("t=-9223372036854775808,v1=00");
        assert_eq!(
            verifier.verify_at(BODY, &headers, NOW),
            Err(VerificationError::TimestampTooOld)
        );

        let headers = headers_with("t=9223372036854775807,v1=00");
        assert_eq!(
            verifier.verify_at(BODY, &headers, NOW),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_unbounded_tolerance() {
        let verifier = StripeVerifier::new(SECRET).unwrap().with_tolerance(u64::MAX);

        let headers = headers_with(&verifier.sign(NOW, BODY));
        assert_eq!(verifier.verify_at(BODY, &headers, NOW), Ok(()));

        let headers = headers_with(&verifier.sign(i64::MIN, BODY));
        assert_eq!(verifier.verify_at(BODY, &headers, NOW), Ok(()));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let signer = StripeVerifier::new("whsec_other").unwrap();
        let verifier = StripeVerifier::new(SECRET).unwrap();
        let headers = headers_with(&signer.sign(NOW, BODY));
        assert_eq!(
            verifier.verify_at(BODY, &headers, NOW),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_rolled_secret() {
        let old = StripeVerifier::new("whsec_old").unwrap();
        let new = StripeVerifier::new(SECRET).unwrap();
        let old_sig = old.sign(NOW, BODY);
        let new_sig = new.sign(NOW, BODY);
        let combined = format!(
            "{},{}",
            old_sig,
            new_sig.split_once(',').map(|(_, v1)| v1).unwrap()
        );

        assert_eq!(new.verify_at(BODY, &headers_with(&combined), NOW), Ok(()));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let verifier = StripeVerifier::new(SECRET).unwrap();
        let headers = headers_with(&verifier.sign(NOW, br#"{"id":"evt_1"}"#));
        assert_eq!(
            verifier.verify_at(br#"{"id":"evt_2"}"#, &headers, NOW),
            Err(VerificationError::SignatureMismatch)
        );
    }

    proptest! {
        #[test]
        fn prop_signed_body_verifies(body in proptest::collection::vec(any::<u8>(), 0..512)) {
            let verifier = StripeVerifier::new(SECRET).unwrap();
            let headers = headers_with(&verifier.sign(NOW, &body));
            prop_assert_eq!(verifier.verify_at(&body, &headers, NOW), Ok(()));
        }

        #[test]
        fn prop_mutated_body_rejected(
            body in proptest::collection::vec(any::<u8>(), 1..512),
            index in any::<proptest::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let verifier = StripeVerifier::new(SECRET).unwrap();
            let headers = headers_with(&verifier.sign(NOW, &body));

            let mut tampered = body.clone();
            let i = index.index(tampered.len());
            tampered[i] ^= flip;

            prop_assert_eq!(
                verifier.verify_at(&tampered, &headers, NOW),
                Err(VerificationError::SignatureMismatch)
            );
        }

        #[test]
        fn prop_mutated_signature_rejected(
            body in proptest::collection::vec(any::<u8>(), 0..256),
            index in 0usize..64,
        ) {
            let verifier = StripeVerifier::new(SECRET).unwrap();
            let header = verifier.sign(NOW, &body);
            let (prefix, hex_sig) = header.split_once("v1=").unwrap();

            let mut sig = hex_sig.as_bytes().to_vec();
            sig[index] = if sig[index] == b'0' { b'1' } else { b'0' };
            let tampered = format!("{}v1={}", prefix, String::from_utf8(sig).unwrap());

            prop_assert_eq!(
                verifier.verify_at(&body, &headers_with(&tampered), NOW),
                Err(VerificationError::SignatureMismatch)
            );
        }
    }
}
