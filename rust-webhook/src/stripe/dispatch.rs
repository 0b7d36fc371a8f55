//! Event decoding for Stripe webhooks.
//!
//! Every event family owns a type prefix, an allowlist of event types and a
//! payload schema. [`EventRouter`] picks the family by longest matching prefix;
//! the family's `process_*` function then checks the allowlist and decodes
//! `data.object` into its typed payload.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;

use super::event::Event;
use super::objects::{
    Balance, Charge, CheckoutSession, Coupon, CreditNote, Customer, Discount, Invoice,
    InvoiceItem, Mandate, PaymentIntent, PaymentLink, PaymentMethod, Plan, Price, Product,
    PromotionCode, Quote, SetupIntent, Source, Subscription, SubscriptionSchedule, TaxId,
    TaxRate, TaxSettings,
};
use crate::error::{ConfigError, EventError};

/// Decode `data.object` as `T` if the event type is in `allowed`.
fn decode_allowed<T: DeserializeOwned>(event: &Event, allowed: &[&str]) -> Result<T, EventError> {
    let event_type = event.event_type();
    if !allowed.contains(&event_type) {
        return Err(EventError::Unhandled(event_type.to_string()));
    }

    serde_json::from_str(event.data.object.get()).map_err(|source| EventError::Decode {
        event_type: event_type.to_string(),
        source,
    })
}

macro_rules! event_families {
    ($(
        $variant:ident => {
            name: $name:literal,
            prefix: $prefix:literal,
            payload: $payload:ty,
            decoder: $decoder:ident,
            types: [$($event_type:literal),+ $(,)?] $(,)?
        }
    ),+ $(,)?) => {
        /// A group of Stripe event types sharing one prefix and payload schema.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EventFamily {
            $($variant),+
        }

        impl EventFamily {
            pub const ALL: &'static [EventFamily] = &[$(EventFamily::$variant),+];

            /// Configuration name, e.g. `customer_subscription`.
            pub fn name(self) -> &'static str {
                match self {
                    $(EventFamily::$variant => $name),+
                }
            }

            /// Event type prefix, including the trailing dot.
            pub fn prefix(self) -> &'static str {
                match self {
                    $(EventFamily::$variant => $prefix),+
                }
            }

            /// Event types this family decodes.
            pub fn event_types(self) -> &'static [&'static str] {
                match self {
                    $(EventFamily::$variant => &[$($event_type),+]),+
                }
            }

            /// Decode `event` with this family's decoder.
            pub fn decode(self, event: &Event) -> Result<TypedPayload, EventError> {
                match self {
                    $(EventFamily::$variant => $decoder(event).map(TypedPayload::$variant)),+
                }
            }
        }

        /// A decoded `data.object`, tagged by family.
        #[derive(Debug, Clone, PartialEq)]
        pub enum TypedPayload {
            $($variant($payload)),+
        }

        impl TypedPayload {
            pub fn family(&self) -> EventFamily {
                match self {
                    $(TypedPayload::$variant(_) => EventFamily::$variant),+
                }
            }
        }

        $(
            pub fn $decoder(event: &Event) -> Result<$payload, EventError> {
                decode_allowed(event, EventFamily::$variant.event_types())
            }
        )+
    };
}

event_families! {
    Balance => {
        name: "balance",
        prefix: "balance.",
        payload: Balance,
        decoder: process_balance,
        types: ["balance.available"],
    },
    Charge => {
        name: "charge",
        prefix: "charge.",
        payload: Charge,
        decoder: process_charge,
        types: [
            "charge.captured",
            "charge.dispute.closed",
            "charge.dispute.created",
            "charge.dispute.funds_reinstated",
            "charge.dispute.funds_withdrawn",
            "charge.dispute.updated",
            "charge.expired",
            "charge.failed",
            "charge.pending",
            "charge.refund.updated",
            "charge.refunded",
            "charge.succeeded",
            "charge.updated",
        ],
    },
    CheckoutSession => {
        name: "checkout_session",
        prefix: "checkout.session.",
        payload: CheckoutSession,
        decoder: process_checkout_session,
        types: [
            "checkout.session.async_payment_failed",
            "checkout.session.async_payment_succeeded",
            "checkout.session.completed",
            "checkout.session.expired",
        ],
    },
    Coupon => {
        name: "coupon",
        prefix: "coupon.",
        payload: Coupon,
        decoder: process_coupon,
        types: ["coupon.created", "coupon.deleted", "coupon.updated"],
    },
    CreditNote => {
        name: "credit_note",
        prefix: "credit_note.",
        payload: CreditNote,
        decoder: process_credit_note,
        types: ["credit_note.created", "credit_note.updated", "credit_note.voided"],
    },
    Customer => {
        name: "customer",
        prefix: "customer.",
        payload: Customer,
        decoder: process_customer,
        types: ["customer.created", "customer.updated", "customer.deleted"],
    },
    CustomerDiscount => {
        name: "customer_discount",
        prefix: "customer.discount.",
        payload: Discount,
        decoder: process_customer_discount,
        types: [
            "customer.discount.created",
            "customer.discount.deleted",
            "customer.discount.updated",
        ],
    },
    CustomerSource => {
        name: "customer_source",
        prefix: "customer.source.",
        payload: Source,
        decoder: process_customer_source,
        types: [
            "customer.source.created",
            "customer.source.deleted",
            "customer.source.expiring",
            "customer.source.updated",
        ],
    },
    CustomerSubscription => {
        name: "customer_subscription",
        prefix: "customer.subscription.",
        payload: Subscription,
        decoder: process_customer_subscription,
        types: [
            "customer.subscription.created",
            "customer.subscription.deleted",
            "customer.subscription.paused",
            "customer.subscription.pending_update_applied",
            "customer.subscription.pending_update_expired",
            "customer.subscription.resumed",
            "customer.subscription.trial_will_end",
            "customer.subscription.updated",
        ],
    },
    CustomerTaxId => {
        name: "customer_tax_id",
        prefix: "customer.tax_id.",
        payload: TaxId,
        decoder: process_customer_tax_id,
        types: [
            "customer.tax_id.created",
            "customer.tax_id.deleted",
            "customer.tax_id.updated",
        ],
    },
    Invoice => {
        name: "invoice",
        prefix: "invoice.",
        payload: Invoice,
        decoder: process_invoice,
        types: [
            "invoice.created",
            "invoice.deleted",
            "invoice.finalization_failed",
            "invoice.finalized",
            "invoice.marked_uncollectible",
            "invoice.overdue",
            "invoice.paid",
            "invoice.payment_action_required",
            "invoice.payment_failed",
            "invoice.payment_succeeded",
            "invoice.sent",
            "invoice.upcoming",
            "invoice.updated",
            "invoice.voided",
            "invoice.will_be_due",
        ],
    },
    InvoiceItem => {
        name: "invoiceitem",
        prefix: "invoiceitem.",
        payload: InvoiceItem,
        decoder: process_invoiceitem,
        types: ["invoiceitem.created", "invoiceitem.deleted"],
    },
    Mandate => {
        name: "mandate",
        prefix: "mandate.",
        payload: Mandate,
        decoder: process_mandate,
        types: ["mandate.updated"],
    },
    PaymentIntent => {
        name: "payment_intent",
        prefix: "payment_intent.",
        payload: PaymentIntent,
        decoder: process_payment_intent,
        types: [
            "payment_intent.amount_capturable_updated",
            "payment_intent.canceled",
            "payment_intent.created",
            "payment_intent.partially_funded",
            "payment_intent.payment_failed",
            "payment_intent.processing",
            "payment_intent.requires_action",
            "payment_intent.succeeded",
        ],
    },
    PaymentLink => {
        name: "payment_link",
        prefix: "payment_link.",
        payload: PaymentLink,
        decoder: process_payment_link,
        types: ["payment_link.created", "payment_link.updated"],
    },
    PaymentMethod => {
        name: "payment_method",
        prefix: "payment_method.",
        payload: PaymentMethod,
        decoder: process_payment_method,
        types: [
            "payment_method.attached",
            "payment_method.automatically_updated",
            "payment_method.detached",
            "payment_method.updated",
        ],
    },
    Plan => {
        name: "plan",
        prefix: "plan.",
        payload: Plan,
        decoder: process_plan,
        types: ["plan.created", "plan.deleted", "plan.updated"],
    },
    Price => {
        name: "price",
        prefix: "price.",
        payload: Price,
        decoder: process_price,
        types: ["price.created", "price.deleted", "price.updated"],
    },
    Product => {
        name: "product",
        prefix: "product.",
        payload: Product,
        decoder: process_product,
        types: ["product.created", "product.deleted", "product.updated"],
    },
    PromotionCode => {
        name: "promotion_code",
        prefix: "promotion_code.",
        payload: PromotionCode,
        decoder: process_promotion_code,
        types: ["promotion_code.created", "promotion_code.updated"],
    },
    Quote => {
        name: "quote",
        prefix: "quote.",
        payload: Quote,
        decoder: process_quote,
        types: [
            "quote.accepted",
            "quote.canceled",
            "quote.created",
            "quote.finalized",
            "quote.will_expire",
        ],
    },
    SetupIntent => {
        name: "setup_intent",
        prefix: "setup_intent.",
        payload: SetupIntent,
        decoder: process_setup_intent,
        types: [
            "setup_intent.canceled",
            "setup_intent.created",
            "setup_intent.requires_action",
            "setup_intent.setup_failed",
            "setup_intent.succeeded",
        ],
    },
    SubscriptionSchedule => {
        name: "subscription_schedule",
        prefix: "subscription_schedule.",
        payload: SubscriptionSchedule,
        decoder: process_subscription_schedule,
        types: [
            "subscription_schedule.aborted",
            "subscription_schedule.canceled",
            "subscription_schedule.completed",
            "subscription_schedule.created",
            "subscription_schedule.expiring",
            "subscription_schedule.released",
            "subscription_schedule.updated",
        ],
    },
    TaxRate => {
        name: "tax_rate",
        prefix: "tax_rate.",
        payload: TaxRate,
        decoder: process_tax_rate,
        types: ["tax_rate.created", "tax_rate.updated"],
    },
    TaxSettings => {
        name: "tax_settings",
        prefix: "tax.settings.",
        payload: TaxSettings,
        decoder: process_tax_settings,
        types: ["tax.settings.updated"],
    },
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        EventFamily::ALL
            .iter()
            .copied()
            .find(|family| family.name() == name)
            .ok_or_else(|| ConfigError::UnknownEventFamily(name.to_string()))
    }
}

#[derive(Debug, Clone)]
struct Route {
    prefix: &'static str,
    family: EventFamily,
    enabled: bool,
}

/// Prefix routing table from event type to decoder.
///
/// Routes are kept longest prefix first, so `customer.subscription.updated`
/// lands on [`EventFamily::CustomerSubscription`] and never on the generic
/// `customer.` route. A disabled family keeps its prefix but decodes nothing.
#[derive(Debug, Clone)]
pub struct EventRouter {
    routes: Vec<Route>,
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    /// Router covering every family.
    pub fn new() -> Self {
        Self::with_families(EventFamily::ALL)
    }

    /// Router that decodes only `families`.
    pub fn with_families(families: &[EventFamily]) -> Self {
        let mut routes: Vec<Route> = EventFamily::ALL
            .iter()
            .map(|&family| Route {
                prefix: family.prefix(),
                family,
                enabled: families.contains(&family),
            })
            .collect();
        routes.sort_by_key(|route| Reverse(route.prefix.len()));

        Self { routes }
    }

    /// Family that decodes `event_type`, if any.
    pub fn route(&self, event_type: &str) -> Option<EventFamily> {
        self.routes
            .iter()
            .find(|route| event_type.starts_with(route.prefix))
            .filter(|route| route.enabled)
            .map(|route| route.family)
    }

    /// Route and decode a verified event.
    pub fn decode(&self, event: &Event) -> Result<TypedPayload, EventError> {
        match self.route(event.event_type()) {
            Some(family) => family.decode(event),
            None => Err(EventError::Unhandled(event.event_type().to_string())),
        }
    }

    /// Families this router decodes.
    pub fn families(&self) -> impl Iterator<Item = EventFamily> + '_ {
        self.routes
            .iter()
            .filter(|route| route.enabled)
            .map(|route| route.family)
    }
}
