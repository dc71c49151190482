//! Stripe REST API response bodies.
//!
//! Only the fields this service reads are modelled; everything else in the
//! response is ignored.

use serde::Deserialize;

/// Response from `POST /v1/checkout/sessions`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    /// Session identifier (cs_...).
    pub id: String,

    /// Hosted checkout page URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// Error envelope returned with any non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    pub error: StripeErrorDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StripeErrorDetail {
    /// Human-readable message, safe to show to the caller.
    #[serde(default)]
    pub message: Option<String>,

    /// Short machine code (e.g. `resource_missing`).
    #[serde(default)]
    pub code: Option<String>,

    /// Error category (e.g. `invalid_request_error`).
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Request parameter the error relates to.
    #[serde(default)]
    pub param: Option<String>,
}
