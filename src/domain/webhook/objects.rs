//! Typed views over the `data.object` of recognized events.
//!
//! Every field is optional: payloads from older API versions, fixtures, or
//! the provider's CLI may omit most of them, and handlers only log what is
//! present.

use serde::{Deserialize, Serialize};

/// Checkout session object (`checkout.session.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckoutSessionObject {
    /// Session identifier (cs_...).
    #[serde(default)]
    pub id: Option<String>,

    /// paid, unpaid, no_payment_required.
    #[serde(default)]
    pub payment_status: Option<String>,

    /// open, complete, expired.
    #[serde(default)]
    pub status: Option<String>,

    /// Total in the smallest currency unit.
    #[serde(default)]
    pub amount_total: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub customer_email: Option<String>,

    /// Payment intent created by the session.
    #[serde(default)]
    pub payment_intent: Option<String>,

    #[serde(default)]
    pub mode: Option<String>,
}

/// Payment intent object (`payment_intent.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaymentIntentObject {
    /// Intent identifier (pi_...).
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub amount: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    /// Present on `payment_intent.payment_failed`.
    #[serde(default)]
    pub last_payment_error: Option<PaymentFailure>,
}

/// Why a payment attempt failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaymentFailure {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub decline_code: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Charge object (`charge.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChargeObject {
    /// Charge identifier (ch_...).
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub amount: Option<i64>,

    #[serde(default)]
    pub amount_captured: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub paid: Option<bool>,

    #[serde(default)]
    pub payment_intent: Option<String>,

    #[serde(default)]
    pub receipt_url: Option<String>,

    #[serde(default)]
    pub failure_message: Option<String>,
}
