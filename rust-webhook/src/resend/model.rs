//! Resend webhook payloads.
//!
//! See <https://resend.com/docs/dashboard/webhooks/event-types>.

use serde::{Deserialize, Serialize};

/// Resend event type.
///
/// Unrecognized values are kept in [`EventType::Other`] so a new event type
/// never fails parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    EmailSent,
    EmailDelivered,
    EmailDeliveryDelayed,
    EmailComplained,
    EmailBounced,
    EmailOpened,
    EmailClicked,
    ContactCreated,
    ContactUpdated,
    ContactDeleted,
    Other(String),
}

impl Default for EventType {
    fn default() -> Self {
        EventType::Other(String::new())
    }
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::EmailSent => "email.sent",
            EventType::EmailDelivered => "email.delivered",
            EventType::EmailDeliveryDelayed => "email.delivery_delayed",
            EventType::EmailComplained => "email.complained",
            EventType::EmailBounced => "email.bounced",
            EventType::EmailOpened => "email.opened",
            EventType::EmailClicked => "email.clicked",
            EventType::ContactCreated => "contact.created",
            EventType::ContactUpdated => "contact.updated",
            EventType::ContactDeleted => "contact.deleted",
            EventType::Other(other) => other,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(
            self,
            EventType::EmailSent
                | EventType::EmailDelivered
                | EventType::EmailDeliveryDelayed
                | EventType::EmailComplained
                | EventType::EmailBounced
                | EventType::EmailOpened
                | EventType::EmailClicked
        )
    }

    pub fn is_contact(&self) -> bool {
        matches!(
            self,
            EventType::ContactCreated | EventType::ContactUpdated | EventType::ContactDeleted
        )
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "email.sent" => EventType::EmailSent,
            "email.delivered" => EventType::EmailDelivered,
            "email.delivery_delayed" => EventType::EmailDeliveryDelayed,
            "email.complained" => EventType::EmailComplained,
            "email.bounced" => EventType::EmailBounced,
            "email.opened" => EventType::EmailOpened,
            "email.clicked" => EventType::EmailClicked,
            "contact.created" => EventType::ContactCreated,
            "contact.updated" => EventType::ContactUpdated,
            "contact.deleted" => EventType::ContactDeleted,
            _ => EventType::Other(value),
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incoming Resend webhook body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Payload {
    #[serde(rename = "type", default)]
    pub event_type: EventType,

    #[serde(default)]
    pub created_at: String,

    #[serde(default)]
    pub data: Data,
}

impl Payload {
    /// `created_at` as unix seconds, if it is valid RFC 3339.
    pub fn created_at_unix(&self) -> Option<i64> {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.timestamp())
    }
}

/// Event data, covering both email and contact events.
///
/// Fields that do not apply to an event type are left empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Data {
    pub created_at: String,

    // Email events
    pub email_id: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click: Option<Click>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounce: Option<Bounce>,

    // Contact events
    pub id: String,
    pub audience_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub unsubscribed: bool,
    pub updated_at: String,
}

/// Click details, only sent with `email.clicked`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Click {
    pub ip_address: String,
    pub link: String,
    pub timestamp: String,
    pub user_agent: String,
}

/// Bounce details, only sent with `email.bounced`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bounce {
    pub message: String,
    pub sub_type: String,
    #[serde(rename = "type")]
    pub bounce_type: String,
}

/// A Resend event narrowed to its sub-domain.
#[derive(Debug, Clone, PartialEq)]
pub enum ResendEvent {
    Email(EmailEvent),
    Contact(ContactEvent),
}

impl ResendEvent {
    pub fn event_type(&self) -> &EventType {
        match self {
            ResendEvent::Email(e) => &e.event_type,
            ResendEvent::Contact(c) => &c.event_type,
        }
    }
}

/// Email lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailEvent {
    pub event_type: EventType,
    pub email_id: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub created_at: String,
    /// Envelope `created_at` as unix seconds.
    pub sent_at: Option<i64>,
    pub click: Option<Click>,
    pub bounce: Option<Bounce>,
}

/// Contact lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    pub event_type: EventType,
    pub id: String,
    pub audience_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub unsubscribed: bool,
    pub created_at: String,
    pub updated_at: String,
    /// Envelope `created_at` as unix seconds.
    pub sent_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicked_payload() {
        let payload: Payload = serde_json::from_str(
            r#"{
                "type": "email.clicked",
                "created_at": "2024-11-22T23:41:12.126Z",
                "data": {
                    "created_at": "2024-11-22T23:41:11.894719+00:00",
                    "email_id": "56761188-7520-42d8-8898-ff6fc54ce618",
                    "from": "Acme <onboarding@resend.dev>",
                    "to": ["delivered@resend.dev"],
                    "subject": "Sending this example",
                    "click": {
                        "ipAddress": "122.115.53.11",
                        "link": "https://resend.com",
                        "timestamp": "2024-11-24T05:00:57.163Z",
                        "userAgent": "Mozilla/5.0"
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(payload.event_type, EventType::EmailClicked);
        assert_eq!(payload.created_at_unix(), Some(1732318872));
        assert_eq!(payload.data.to, vec!["delivered@resend.dev"]);

        let click = payload.data.click.unwrap();
        assert_eq!(click.ip_address, "122.115.53.11");
        assert_eq!(click.link, "https://resend.com");
        assert_eq!(click.timestamp, "2024-11-24T05:00:57.163Z");
        assert_eq!(click.user_agent, "Mozilla/5.0");
    }

    #[test]
    fn test_sent_payload_has_no_click() {
        let payload: Payload = serde_json::from_str(
            r#"{"type":"email.sent","created_at":"not a date","data":{"email_id":"e_1","to":["a@b.c"]}}"#,
        )
        .unwrap();

        assert_eq!(payload.event_type, EventType::EmailSent);
        assert!(payload.data.click.is_none());
        assert!(payload.data.bounce.is_none());
        assert_eq!(payload.created_at_unix(), None);
    }

    #[test]
    fn test_contact_payload() {
        let payload: Payload = serde_json::from_str(
            r#"{
                "type": "contact.updated",
                "created_at": "2024-10-11T23:47:56.678Z",
                "data": {
                    "id": "e169aa45-1ecf-4183-9955-b1499d5701d3",
                    "audience_id": "78261eea-8f8b-4381-83c6-79fa7120f1cf",
                    "created_at": "2024-10-10T15:11:94.110Z",
                    "updated_at": "2024-10-11T23:47:56.678Z",
                    "email": "steve.wozniak@gmail.com",
                    "first_name": "Steve",
                    "last_name": null,
                    "unsubscribed": true
                }
            }"#,
        )
        .unwrap();

        assert!(payload.event_type.is_contact());
        assert_eq!(payload.data.email, "steve.wozniak@gmail.com");
        assert_eq!(payload.data.first_name.as_deref(), Some("Steve"));
        assert!(payload.data.last_name.is_none());
        assert!(payload.data.unsubscribed);
    }

    #[test]
    fn test_event_type_strings() {
        let unknown = EventType::from("domain.updated".to_string());
        assert_eq!(unknown, EventType::Other("domain.updated".to_string()));
        assert!(!unknown.is_email() && !unknown.is_contact());
        assert_eq!(String::from(unknown), "domain.updated");

        assert!(EventType::EmailDeliveryDelayed.is_email());
        assert_eq!(EventType::from("email.bounced".to_string()), EventType::EmailBounced);
        assert_eq!(
            serde_json::to_string(&EventType::ContactDeleted).unwrap(),
            r#""contact.deleted""#
        );
    }
}
