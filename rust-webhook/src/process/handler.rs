//! Consumers of decoded events.

use tracing::info;

use super::DecodedEvent;
use crate::resend::ResendEvent;
use crate::stripe::TypedPayload;

/// Receives every event the worker decodes successfully.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: DecodedEvent);
}

/// Logs a short summary of each decoded event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHandler;

impl EventHandler for LogHandler {
    fn handle(&self, event: DecodedEvent) {
        match &event {
            DecodedEvent::Resend(ResendEvent::Email(email)) => info!(
                provider = "resend",
                event_type = %email.event_type,
                email_id = %email.email_id,
                recipients = email.to.len(),
                subject = %email.subject,
                sent_at = ?email.sent_at,
                clicked_link = ?email.click.as_ref().map(|c| c.link.as_str()),
                bounce_type = ?email.bounce.as_ref().map(|b| b.bounce_type.as_str()),
                "email_event_handled"
            ),
            DecodedEvent::Resend(ResendEvent::Contact(contact)) => info!(
                provider = "resend",
                event_type = %contact.event_type,
                contact_id = %contact.id,
                audience_id = %contact.audience_id,
                unsubscribed = contact.unsubscribed,
                sent_at = ?contact.sent_at,
                "contact_event_handled"
            ),
            DecodedEvent::Stripe { event_id, event_type, payload } => info!(
                provider = "stripe",
                event_id = %event_id,
                event_type = %event_type,
                family = %payload.family(),
                object_id = ?object_id(payload),
                "stripe_event_handled"
            ),
        }
    }
}

/// Id of the Stripe object an event is about, when it has one.
pub(crate) fn object_id(payload: &TypedPayload) -> Option<&str> {
    let id = match payload {
        TypedPayload::Balance(_) | TypedPayload::TaxSettings(_) => return None,
        TypedPayload::Invoice(invoice) => return invoice.id.as_deref(),
        TypedPayload::Charge(o) => &o.id,
        TypedPayload::CheckoutSession(o) => &o.id,
        TypedPayload::Coupon(o) => &o.id,
        TypedPayload::CreditNote(o) => &o.id,
        TypedPayload::Customer(o) => &o.id,
        TypedPayload::CustomerDiscount(o) => &o.id,
        TypedPayload::CustomerSource(o) => &o.id,
        TypedPayload::CustomerSubscription(o) => &o.id,
        TypedPayload::CustomerTaxId(o) => &o.id,
        TypedPayload::InvoiceItem(o) => &o.id,
        TypedPayload::Mandate(o) => &o.id,
        TypedPayload::PaymentIntent(o) => &o.id,
        TypedPayload::PaymentLink(o) => &o.id,
        TypedPayload::PaymentMethod(o) => &o.id,
        TypedPayload::Plan(o) => &o.id,
        TypedPayload::Price(o) => &o.id,
        TypedPayload::Product(o) => &o.id,
        TypedPayload::PromotionCode(o) => &o.id,
        TypedPayload::Quote(o) => &o.id,
        TypedPayload::SetupIntent(o) => &o.id,
        TypedPayload::SubscriptionSchedule(o) => &o.id,
        TypedPayload::TaxRate(o) => &o.id,
    };
    Some(id.as_str()).filter(|id| !id.is_empty())
}
