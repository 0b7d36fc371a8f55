//! Configuration module for environment variable parsing.
//!
//! Signing secrets are required and trimmed; everything else falls back to a
//! default with a warning when the value does not parse.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::error::ConfigError;
use crate::stripe::EventFamily;

pub const RESEND_SECRET_VAR: &str = "RESEND_WEBHOOK_SECRET";
pub const STRIPE_SECRET_VAR: &str = "STRIPE_WEBHOOK_SECRET";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Svix signing secret for Resend webhooks (`whsec_...`)
    pub resend_webhook_secret: String,

    /// Stripe endpoint signing secret
    pub stripe_webhook_secret: String,

    /// Route path for Resend webhooks
    pub resend_webhook_path: String,

    /// Route path for Stripe webhooks
    pub stripe_webhook_path: String,

    /// Maximum age in seconds for signature timestamps (both providers)
    pub signature_tolerance_secs: u64,

    /// Capacity of the in-process event queue
    pub queue_capacity: usize,

    /// Stripe event families to decode; `None` means all of them
    pub stripe_event_families: Option<Vec<EventFamily>>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stripe_event_families = match parse_csv(&lookup, "STRIPE_EVENT_FAMILIES") {
            Some(names) if !names.is_empty() => Some(
                names
                    .iter()
                    .map(|name| EventFamily::from_str(name))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            _ => None,
        };

        let config = Config {
            port: parse_or(&lookup, "PORT", 8080),

            resend_webhook_secret: required_secret(&lookup, RESEND_SECRET_VAR)?,

            stripe_webhook_secret: required_secret(&lookup, STRIPE_SECRET_VAR)?,

            resend_webhook_path: route_path(&lookup, "RESEND_WEBHOOK_PATH", "/webhooks/resend")?,

            stripe_webhook_path: route_path(&lookup, "STRIPE_WEBHOOK_PATH", "/webhooks/stripe")?,

            signature_tolerance_secs: parse_or(&lookup, "WEBHOOK_TOLERANCE_SECS", 300), // 5 minutes

            queue_capacity: parse_or(&lookup, "EVENT_QUEUE_CAPACITY", 1024),

            stripe_event_families,
        };

        if config.resend_webhook_path == config.stripe_webhook_path {
            return Err(ConfigError::InvalidPath {
                name: "STRIPE_WEBHOOK_PATH",
                value: config.stripe_webhook_path,
            });
        }

        Ok(config)
    }
}

/// Read a route path; it must be absolute and must not shadow `/health`.
fn route_path<F>(lookup: &F, name: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());

    if !path.starts_with('/') || path == "/health" {
        return Err(ConfigError::InvalidPath { name, value: path });
    }
    Ok(path)
}

/// Read a signing secret; absent or blank values are fatal.
fn required_secret<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secret = lookup(name).map(|v| v.trim().to_string()).unwrap_or_default();
    if secret.is_empty() {
        return Err(ConfigError::MissingSecret(name));
    }
    Ok(secret)
}

/// Parse a value, falling back to `default` when absent or invalid.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = match lookup(name) {
        Some(v) => v,
        None => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Parse a comma-separated list of strings.
fn parse_csv<F>(lookup: &F, name: &str) -> Option<Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).map(|raw| {
        raw.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn base_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            (RESEND_SECRET_VAR, "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw"),
            (STRIPE_SECRET_VAR, "whsec_test_secret"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&base_vars())).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.resend_webhook_path, "/webhooks/resend");
        assert_eq!(config.stripe_webhook_path, "/webhooks/stripe");
        assert_eq!(config.signature_tolerance_secs, 300);
        assert_eq!(config.queue_capacity, 1024);
        assert!(config.stripe_event_families.is_none());
    }

    #[test]
    fn test_secrets_are_trimmed() {
        let vars = [
            (RESEND_SECRET_VAR, "  whsec_abc \n"),
            (STRIPE_SECRET_VAR, "\twhsec_def"),
        ];
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.resend_webhook_secret, "whsec_abc");
        assert_eq!(config.stripe_webhook_secret, "whsec_def");
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let vars = [(STRIPE_SECRET_VAR, "whsec_def")];
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret(RESEND_SECRET_VAR)));
    }

    #[test]
    fn test_blank_secret_is_fatal() {
        let vars = [(RESEND_SECRET_VAR, "whsec_abc"), (STRIPE_SECRET_VAR, "   ")];
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSecret(STRIPE_SECRET_VAR)));
    }

    #[test]
    fn test_invalid_number_uses_default() {
        let mut vars = base_vars();
        vars.push(("PORT", "not-a-port"));
        vars.push(("WEBHOOK_TOLERANCE_SECS", "600"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.signature_tolerance_secs, 600);
    }

    #[test]
    fn test_event_families() {
        let mut vars = base_vars();
        vars.push(("STRIPE_EVENT_FAMILIES", "charge, invoice ,customer_subscription"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();

        assert_eq!(
            config.stripe_event_families,
            Some(vec![
                EventFamily::Charge,
                EventFamily::Invoice,
                EventFamily::CustomerSubscription
            ])
        );
    }

    #[test]
    fn test_unknown_event_family() {
        let mut vars = base_vars();
        vars.push(("STRIPE_EVENT_FAMILIES", "charge,refunds"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEventFamily(name) if name == "refunds"));
    }

    #[test]
    fn test_route_paths() {
        let mut vars = base_vars();
        vars.push(("RESEND_WEBHOOK_PATH", "/hooks/email"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.resend_webhook_path, "/hooks/email");

        let mut vars = base_vars();
        vars.push(("STRIPE_WEBHOOK_PATH", "webhooks/stripe"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { name: "STRIPE_WEBHOOK_PATH", .. }));

        let mut vars = base_vars();
        vars.push(("RESEND_WEBHOOK_PATH", "/webhooks/stripe"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_parse_csv() {
        let lookup = lookup_from(&[("TEST_CSV", "foo, bar, ,baz")]);
        let result = parse_csv(&lookup, "TEST_CSV");
        assert_eq!(
            result,
            Some(vec!["foo".to_string(), "bar".to_string(), "baz".to_string()])
        );
    }
}
