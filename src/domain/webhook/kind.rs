//! Webhook event type tags.

use std::fmt;

/// Event types the dispatcher routes to a dedicated handler.
///
/// Anything else lands in `Other` and is acknowledged without action, so
/// new provider event types never break delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WebhookEventKind {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,

    /// Payment intent succeeded.
    PaymentIntentSucceeded,

    /// Payment intent created.
    PaymentIntentCreated,

    /// Payment intent failed.
    PaymentIntentPaymentFailed,

    /// Charge succeeded.
    ChargeSucceeded,

    /// Charge updated (e.g. balance transaction attached).
    ChargeUpdated,

    /// Unrecognized event type, kept verbatim.
    Other(String),
}

impl WebhookEventKind {
    /// Parse a provider event type tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "payment_intent.succeeded" => Self::PaymentIntentSucceeded,
            "payment_intent.created" => Self::PaymentIntentCreated,
            "payment_intent.payment_failed" => Self::PaymentIntentPaymentFailed,
            "charge.succeeded" => Self::ChargeSucceeded,
            "charge.updated" => Self::ChargeUpdated,
            other => Self::Other(other.to_string()),
        }
    }

    /// The provider's tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::PaymentIntentSucceeded => "payment_intent.succeeded",
            Self::PaymentIntentCreated => "payment_intent.created",
            Self::PaymentIntentPaymentFailed => "payment_intent.payment_failed",
            Self::ChargeSucceeded => "charge.succeeded",
            Self::ChargeUpdated => "charge.updated",
            Self::Other(tag) => tag,
        }
    }

    /// Whether a dedicated handler exists for this kind.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
