//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! `GET /config` serializes `PublicConfig` directly; the request body of
//! `POST /create-checkout-session` is the domain `CheckoutRequest`.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::CheckoutSession;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a created checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    /// Provider session id, handed to the browser for redirect.
    pub id: String,

    /// Hosted payment page URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<CheckoutSession> for CheckoutSessionResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            id: session.id,
            url: session.url,
        }
    }
}

/// Acknowledgement of an accepted webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookReceivedResponse {
    pub received: bool,
}

impl WebhookReceivedResponse {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Liveness probe response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error body for JSON endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
