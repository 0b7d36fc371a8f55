//! Stripe API objects as they arrive in webhook payloads.
//!
//! Each struct carries the commonly used fields of its object. Unknown fields
//! are ignored, missing fields take their default, and fields Stripe documents
//! as nullable are `Option`.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type Metadata = HashMap<String, String>;

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A reference that is either an object id or the expanded object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Expandable {
    Id(String),
    Object(Value),
}

impl Expandable {
    pub fn id(&self) -> Option<&str> {
        match self {
            Expandable::Id(id) => Some(id),
            Expandable::Object(obj) => obj.get("id").and_then(Value::as_str),
        }
    }
}

/// Paginated list embedded in another object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct List<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    pub has_more: bool,
    pub url: String,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            has_more: false,
            url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Address {
    pub city: Option<String>,
    pub country: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BillingDetails {
    pub address: Option<Address>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Period {
    pub start: i64,
    pub end: i64,
}

/// Error attached to a failed payment or setup attempt.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiError {
    pub code: Option<String>,
    pub decline_code: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub error_type: String,
}

// =============================================================================
// Balance
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Balance {
    #[serde(deserialize_with = "null_as_default")]
    pub available: Vec<BalanceAmount>,
    #[serde(deserialize_with = "null_as_default")]
    pub pending: Vec<BalanceAmount>,
    pub connect_reserved: Option<Vec<BalanceAmount>>,
    pub instant_available: Option<Vec<BalanceAmount>>,
    pub livemode: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BalanceAmount {
    pub amount: i64,
    pub currency: String,
    pub source_types: Option<HashMap<String, i64>>,
}

// =============================================================================
// Charges and checkout
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Charge {
    pub id: String,
    pub amount: i64,
    pub amount_captured: i64,
    pub amount_refunded: i64,
    pub balance_transaction: Option<Expandable>,
    pub billing_details: BillingDetails,
    pub captured: bool,
    pub created: i64,
    pub currency: String,
    pub customer: Option<Expandable>,
    pub description: Option<String>,
    pub disputed: bool,
    pub failure_code: Option<String>,
    pub failure_message: Option<String>,
    pub invoice: Option<Expandable>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub paid: bool,
    pub payment_intent: Option<Expandable>,
    pub payment_method: Option<String>,
    pub receipt_email: Option<String>,
    pub receipt_url: Option<String>,
    pub refunded: bool,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckoutSession {
    pub id: String,
    pub amount_subtotal: Option<i64>,
    pub amount_total: Option<i64>,
    pub client_reference_id: Option<String>,
    pub created: i64,
    pub currency: Option<String>,
    pub customer: Option<Expandable>,
    pub customer_details: Option<BillingDetails>,
    pub customer_email: Option<String>,
    pub expires_at: i64,
    pub invoice: Option<Expandable>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub mode: String,
    pub payment_intent: Option<Expandable>,
    pub payment_status: String,
    pub status: Option<String>,
    pub subscription: Option<Expandable>,
    pub success_url: Option<String>,
    pub url: Option<String>,
}

// =============================================================================
// Coupons, discounts and promotion codes
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Coupon {
    pub id: String,
    pub amount_off: Option<i64>,
    pub created: i64,
    pub currency: Option<String>,
    pub duration: String,
    pub duration_in_months: Option<i64>,
    pub livemode: bool,
    pub max_redemptions: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub name: Option<String>,
    pub percent_off: Option<f64>,
    pub redeem_by: Option<i64>,
    pub times_redeemed: i64,
    pub valid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Discount {
    pub id: String,
    pub checkout_session: Option<String>,
    pub coupon: Option<Coupon>,
    pub customer: Option<Expandable>,
    pub end: Option<i64>,
    pub invoice: Option<String>,
    pub invoice_item: Option<String>,
    pub promotion_code: Option<Expandable>,
    pub start: i64,
    pub subscription: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PromotionCode {
    pub id: String,
    pub active: bool,
    pub code: String,
    pub coupon: Option<Coupon>,
    pub created: i64,
    pub customer: Option<Expandable>,
    pub expires_at: Option<i64>,
    pub livemode: bool,
    pub max_redemptions: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub times_redeemed: i64,
}

// =============================================================================
// Customers
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub address: Option<Address>,
    pub balance: i64,
    pub created: i64,
    pub currency: Option<String>,
    pub default_source: Option<Expandable>,
    /// Set on `customer.deleted`
    pub deleted: bool,
    pub delinquent: Option<bool>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub invoice_prefix: Option<String>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_locales: Vec<String>,
    pub tax_exempt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Source {
    pub id: String,
    pub amount: Option<i64>,
    pub client_secret: String,
    pub created: i64,
    pub currency: Option<String>,
    pub customer: Option<String>,
    pub flow: String,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub owner: Option<BillingDetails>,
    pub statement_descriptor: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub usage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxId {
    pub id: String,
    pub country: Option<String>,
    pub created: i64,
    pub customer: Option<Expandable>,
    pub livemode: bool,
    #[serde(rename = "type")]
    pub tax_id_type: String,
    pub value: String,
    pub verification: Option<TaxIdVerification>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxIdVerification {
    pub status: String,
    pub verified_address: Option<String>,
    pub verified_name: Option<String>,
}

// =============================================================================
// Subscriptions
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Subscription {
    pub id: String,
    pub cancel_at: Option<i64>,
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<i64>,
    pub collection_method: String,
    pub created: i64,
    pub currency: String,
    pub current_period_end: Option<i64>,
    pub current_period_start: Option<i64>,
    pub customer: Option<Expandable>,
    pub default_payment_method: Option<Expandable>,
    pub ended_at: Option<i64>,
    pub items: List<SubscriptionItem>,
    pub latest_invoice: Option<Expandable>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub pause_collection: Option<Value>,
    pub start_date: i64,
    pub status: String,
    pub trial_end: Option<i64>,
    pub trial_start: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SubscriptionItem {
    pub id: String,
    pub created: i64,
    pub current_period_end: Option<i64>,
    pub current_period_start: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub price: Option<Price>,
    pub quantity: Option<i64>,
    pub subscription: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SubscriptionSchedule {
    pub id: String,
    pub canceled_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created: i64,
    pub current_phase: Option<SchedulePhaseWindow>,
    pub customer: Option<Expandable>,
    pub end_behavior: String,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(deserialize_with = "null_as_default")]
    pub phases: Vec<SchedulePhase>,
    pub released_at: Option<i64>,
    pub released_subscription: Option<String>,
    pub status: String,
    pub subscription: Option<Expandable>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulePhaseWindow {
    pub start_date: i64,
    pub end_date: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulePhase {
    pub start_date: i64,
    pub end_date: i64,
    pub proration_behavior: String,
    pub trial_end: Option<i64>,
}

// =============================================================================
// Invoicing
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Invoice {
    /// Absent on `invoice.upcoming`
    pub id: Option<String>,
    pub account_country: Option<String>,
    pub amount_due: i64,
    pub amount_paid: i64,
    pub amount_remaining: i64,
    pub attempt_count: i64,
    pub attempted: bool,
    pub auto_advance: Option<bool>,
    pub billing_reason: Option<String>,
    pub collection_method: String,
    pub created: i64,
    pub currency: String,
    pub customer: Option<Expandable>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub due_date: Option<i64>,
    pub hosted_invoice_url: Option<String>,
    pub invoice_pdf: Option<String>,
    pub lines: List<InvoiceLineItem>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub number: Option<String>,
    pub period_end: i64,
    pub period_start: i64,
    pub status: Option<String>,
    pub subscription: Option<Expandable>,
    pub subtotal: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InvoiceLineItem {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub period: Option<Period>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InvoiceItem {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub customer: Option<Expandable>,
    pub date: i64,
    pub description: Option<String>,
    pub discountable: bool,
    pub invoice: Option<Expandable>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub period: Option<Period>,
    pub price: Option<Price>,
    pub proration: bool,
    pub quantity: i64,
    pub subscription: Option<Expandable>,
    pub unit_amount: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CreditNote {
    pub id: String,
    pub amount: i64,
    pub created: i64,
    pub currency: String,
    pub customer: Option<Expandable>,
    pub invoice: Option<Expandable>,
    pub livemode: bool,
    pub memo: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub number: String,
    pub reason: Option<String>,
    pub status: String,
    pub subtotal: i64,
    pub total: i64,
    #[serde(rename = "type")]
    pub credit_note_type: String,
    pub voided_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Quote {
    pub id: String,
    pub amount_subtotal: i64,
    pub amount_total: i64,
    pub application_fee_amount: Option<i64>,
    pub collection_method: String,
    pub created: i64,
    pub currency: Option<String>,
    pub customer: Option<Expandable>,
    pub description: Option<String>,
    pub expires_at: i64,
    pub footer: Option<String>,
    pub header: Option<String>,
    pub invoice: Option<Expandable>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub number: Option<String>,
    pub status: String,
    pub subscription: Option<Expandable>,
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub amount_capturable: i64,
    pub amount_received: i64,
    pub canceled_at: Option<i64>,
    pub cancellation_reason: Option<String>,
    pub capture_method: String,
    pub client_secret: Option<String>,
    pub confirmation_method: String,
    pub created: i64,
    pub currency: String,
    pub customer: Option<Expandable>,
    pub description: Option<String>,
    pub invoice: Option<Expandable>,
    pub last_payment_error: Option<ApiError>,
    pub latest_charge: Option<Expandable>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub payment_method: Option<Expandable>,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_method_types: Vec<String>,
    pub receipt_email: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SetupIntent {
    pub id: String,
    pub cancellation_reason: Option<String>,
    pub client_secret: Option<String>,
    pub created: i64,
    pub customer: Option<Expandable>,
    pub description: Option<String>,
    pub last_setup_error: Option<ApiError>,
    pub livemode: bool,
    pub mandate: Option<Expandable>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub payment_method: Option<Expandable>,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_method_types: Vec<String>,
    pub status: String,
    pub usage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentLink {
    pub id: String,
    pub active: bool,
    pub allow_promotion_codes: bool,
    pub application_fee_amount: Option<i64>,
    pub currency: String,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentMethod {
    pub id: String,
    pub billing_details: BillingDetails,
    pub card: Option<Card>,
    pub created: i64,
    pub customer: Option<Expandable>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    #[serde(rename = "type")]
    pub method_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Card {
    pub brand: String,
    pub country: Option<String>,
    pub exp_month: i64,
    pub exp_year: i64,
    pub fingerprint: Option<String>,
    pub funding: String,
    pub last4: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Mandate {
    pub id: String,
    pub customer_acceptance: Option<CustomerAcceptance>,
    pub livemode: bool,
    pub payment_method: Option<Expandable>,
    pub status: String,
    #[serde(rename = "type")]
    pub mandate_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CustomerAcceptance {
    pub accepted_at: Option<i64>,
    #[serde(rename = "type")]
    pub acceptance_type: String,
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Plan {
    pub id: String,
    pub active: bool,
    pub amount: Option<i64>,
    pub billing_scheme: String,
    pub created: i64,
    pub currency: String,
    pub interval: String,
    pub interval_count: i64,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub nickname: Option<String>,
    pub product: Option<Expandable>,
    pub trial_period_days: Option<i64>,
    pub usage_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Price {
    pub id: String,
    pub active: bool,
    pub billing_scheme: String,
    pub created: i64,
    pub currency: String,
    pub livemode: bool,
    pub lookup_key: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub nickname: Option<String>,
    pub product: Option<Expandable>,
    pub recurring: Option<Recurring>,
    pub tax_behavior: Option<String>,
    #[serde(rename = "type")]
    pub price_type: String,
    pub unit_amount: Option<i64>,
    pub unit_amount_decimal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Recurring {
    pub interval: String,
    pub interval_count: i64,
    pub trial_period_days: Option<i64>,
    pub usage_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub active: bool,
    pub created: i64,
    pub default_price: Option<Expandable>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub name: String,
    pub shippable: Option<bool>,
    pub statement_descriptor: Option<String>,
    pub tax_code: Option<Expandable>,
    pub unit_label: Option<String>,
    pub updated: i64,
    pub url: Option<String>,
}

// =============================================================================
// Tax
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxRate {
    pub id: String,
    pub active: bool,
    pub country: Option<String>,
    pub created: i64,
    pub description: Option<String>,
    pub display_name: String,
    pub inclusive: bool,
    pub jurisdiction: Option<String>,
    pub livemode: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: Metadata,
    pub percentage: f64,
    pub state: Option<String>,
    pub tax_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxSettings {
    pub defaults: TaxDefaults,
    pub head_office: Option<HeadOffice>,
    pub livemode: bool,
    pub status: String,
    pub status_details: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaxDefaults {
    pub tax_behavior: Option<String>,
    pub tax_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadOffice {
    pub address: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expandable_id_or_object() {
        let id: Expandable = serde_json::from_str(r#""cus_1""#).unwrap();
        assert_eq!(id.id(), Some("cus_1"));

        let obj: Expandable = serde_json::from_str(r#"{"id":"cus_2","email":"a@b.c"}"#).unwrap();
        assert_eq!(obj.id(), Some("cus_2"));
    }

    #[test]
    fn test_null_metadata_and_lists() {
        let customer: Customer = serde_json::from_str(
            r#"{"id":"cus_1","metadata":null,"preferred_locales":null,"email":null}"#,
        )
        .unwrap();
        assert!(customer.metadata.is_empty());
        assert!(customer.preferred_locales.is_empty());
        assert!(customer.email.is_none());
    }

    #[test]
    fn test_subscription_items() {
        let sub: Subscription = serde_json::from_str(
            r#"{
                "id": "sub_1",
                "object": "subscription",
                "status": "active",
                "customer": "cus_1",
                "items": {
                    "object": "list",
                    "data": [{
                        "id": "si_1",
                        "quantity": 2,
                        "price": {"id": "price_1", "unit_amount": 1500, "currency": "usd",
                                  "recurring": {"interval": "month", "interval_count": 1}}
                    }],
                    "has_more": false,
                    "url": "/v1/subscription_items?subscription=sub_1"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(sub.status, "active");
        assert_eq!(sub.customer.as_ref().and_then(Expandable::id), Some("cus_1"));
        assert_eq!(sub.items.data.len(), 1);
        let price = sub.items.data[0].price.as_ref().unwrap();
        assert_eq!(price.unit_amount, Some(1500));
        assert_eq!(price.recurring.as_ref().unwrap().interval, "month");
    }

    #[test]
    fn test_upcoming_invoice_without_id() {
        let invoice: Invoice =
            serde_json::from_str(r#"{"object":"invoice","amount_due":2000,"currency":"eur"}"#).unwrap();
        assert!(invoice.id.is_none());
        assert_eq!(invoice.amount_due, 2000);
    }
}
