//! Checkout session value types.

use serde::{Deserialize, Serialize};

/// A provider-hosted checkout session, as returned to the caller.
///
/// Never persisted: its lifetime ends once the id reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Opaque provider session id (cs_...).
    pub id: String,

    /// Hosted payment page URL, when the provider returns one.
    pub url: Option<String>,

    pub success_url: String,
    pub cancel_url: String,
    pub locale: String,
}

/// When a card saved during checkout may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupFutureUsage {
    OnSession,
    OffSession,
}

impl SetupFutureUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnSession => "on_session",
            Self::OffSession => "off_session",
        }
    }
}
