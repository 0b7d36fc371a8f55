//! Request-level entry points for Resend webhooks.

use axum::http::HeaderMap;

use super::model::{ContactEvent, EmailEvent, Payload, ResendEvent};
use crate::error::{EventError, WebhookError};
use crate::verify::Verifier;

/// Verify a Resend request and parse its payload.
pub fn handle_request(
    verifier: &dyn Verifier,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Payload, WebhookError> {
    verifier.verify(body, headers)?;
    Ok(serde_json::from_slice(body)?)
}

/// Narrow a payload to an email or contact event by its type.
pub fn process_payload(payload: &Payload) -> Result<ResendEvent, EventError> {
    let event_type = payload.event_type.clone();
    let data = &payload.data;

    if event_type.is_email() {
        return Ok(ResendEvent::Email(EmailEvent {
            event_type,
            email_id: data.email_id.clone(),
            from: data.from.clone(),
            to: data.to.clone(),
            subject: data.subject.clone(),
            created_at: data.created_at.clone(),
            sent_at: payload.created_at_unix(),
            click: data.click.clone(),
            bounce: data.bounce.clone(),
        }));
    }

    if event_type.is_contact() {
        return Ok(ResendEvent::Contact(ContactEvent {
            event_type,
            id: data.id.clone(),
            audience_id: data.audience_id.clone(),
            email: data.email.clone(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            unsubscribed: data.unsubscribed,
            created_at: data.created_at.clone(),
            updated_at: data.updated_at.clone(),
            sent_at: payload.created_at_unix(),
        }));
    }

    Err(EventError::Unhandled(event_type.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerificationError;
    use crate::resend::model::EventType;
    use crate::verify::SvixVerifier;
    use axum::http::HeaderValue;

    const SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";

    fn signed_headers(verifier: &SvixVerifier, body: &[u8]) -> HeaderMap {
        let ts = chrono::Utc::now().timestamp();
        let mut headers = HeaderMap::new();
        headers.insert("svix-id", HeaderValue::from_static("msg_test"));
        headers.insert("svix-timestamp", HeaderValue::from_str(&ts.to_string()).unwrap());
        headers.insert(
            "svix-signature",
            HeaderValue::from_str(&verifier.sign("msg_test", ts, body)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_handle_request() {
        let verifier = SvixVerifier::new(SECRET).unwrap();
        let body = br#"{"type":"email.delivered","created_at":"2024-01-01T00:00:00Z","data":{"email_id":"e_1"}}"#;
        let headers = signed_headers(&verifier, body);

        let payload = handle_request(&verifier, &headers, body).unwrap();
        assert_eq!(payload.event_type, EventType::EmailDelivered);
        assert_eq!(payload.data.email_id, "e_1");
    }

    #[test]
    fn test_verification_and_decode_errors_differ() {
        let verifier = SvixVerifier::new(SECRET).unwrap();

        let headers = signed_headers(&verifier, b"{}");
        let err = handle_request(&verifier, &headers, b"{ }").unwrap_err();
        assert!(matches!(
            err,
            WebhookError::Verification(VerificationError::SignatureMismatch)
        ));

        let headers = signed_headers(&verifier, b"[1, 2");
        let err = handle_request(&verifier, &headers, b"[1, 2").unwrap_err();
        assert!(matches!(err, WebhookError::Malformed(_)));
    }

    #[test]
    fn test_process_email_event() {
        let payload: Payload = serde_json::from_str(
            r#"{"type":"email.bounced","data":{"email_id":"e_1","to":["x@y.z"],
                "bounce":{"message":"mailbox full","subType":"MailboxFull","type":"Transient"}}}"#,
        )
        .unwrap();

        match process_payload(&payload).unwrap() {
            ResendEvent::Email(email) => {
                assert_eq!(email.email_id, "e_1");
                assert_eq!(email.sent_at, None);
                let bounce = email.bounce.unwrap();
                assert_eq!(bounce.sub_type, "MailboxFull");
                assert_eq!(bounce.bounce_type, "Transient");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_process_contact_event() {
        let payload: Payload = serde_json::from_str(
            r#"{"type":"contact.created","created_at":"2024-01-01T00:00:00Z",
                "data":{"id":"c_1","audience_id":"a_1","email":"x@y.z"}}"#,
        )
        .unwrap();

        let event = process_payload(&payload).unwrap();
        assert_eq!(event.event_type(), &EventType::ContactCreated);
        assert!(matches!(
            event,
            ResendEvent::Contact(c) if c.audience_id == "a_1" && c.sent_at == Some(1_704_067_200)
        ));
    }

    #[test]
    fn test_process_unknown_type() {
        let payload: Payload =
            serde_json::from_str(r#"{"type":"domain.created","data":{}}"#).unwrap();
        let err = process_payload(&payload).unwrap_err();
        assert!(matches!(err, EventError::Unhandled(t) if t == "domain.created"));
    }
}
