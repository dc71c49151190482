//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! Implementations create hosted checkout sessions and turn signed webhook
//! deliveries into verified events.
//!
//! # Design
//!
//! - **Gateway agnostic**: Interface works with any payment provider
//! - **Verify before decode**: A `WebhookEvent` only exists once its
//!   signature has been checked against the raw payload bytes

use crate::domain::checkout::{CheckoutError, LineItem, SetupFutureUsage};
use crate::domain::webhook::{WebhookError, WebhookEvent};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a one-time payment checkout session.
    ///
    /// Returns the provider's session id and hosted page URL.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<ProviderCheckoutSession, PaymentError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// `payload` must be the exact bytes received; any re-serialization
    /// invalidates the signature.
    async fn construct_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Accepted payment method types (e.g. `card`).
    pub payment_method_types: Vec<String>,

    /// Resolved line items, never empty.
    pub line_items: Vec<LineItem>,

    /// Hosted page locale (e.g. `ja`).
    pub locale: String,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,

    /// Save the card for later reuse.
    pub setup_future_usage: Option<SetupFutureUsage>,
}

/// Checkout session as created by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for customer to complete checkout.
    pub url: Option<String>,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::Timeout, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create an invalid request error (unknown price, bad parameter).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidRequest, message)
    }

    /// Create an invalid webhook error.
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }

    /// Create an invalid payload error (verified but undecodable).
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidPayload, message)
    }

    /// Create a provider API error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for CheckoutError {
    fn from(err: PaymentError) -> Self {
        CheckoutError::Provider(err.message)
    }
}

impl From<PaymentError> for WebhookError {
    fn from(err: PaymentError) -> Self {
        match err.code {
            PaymentErrorCode::InvalidPayload => WebhookError::Decode(err.message),
            _ => WebhookError::Verification(err.message),
        }
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Provider did not answer within the configured timeout.
    Timeout,

    /// API authentication failed.
    AuthenticationError,

    /// Request rejected by the provider (bad price, bad parameter).
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Invalid webhook signature.
    InvalidWebhook,

    /// Webhook signature valid but payload not decodable.
    InvalidPayload,

    /// Provider API error.
    ProviderError,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError
                | PaymentErrorCode::Timeout
                | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::Timeout => "timeout",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidWebhook => "invalid_webhook",
            PaymentErrorCode::InvalidPayload => "invalid_payload",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn payment_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentProvider) {}
    }

    #[test]
    fn payment_error_retryable() {
        assert!(PaymentErrorCode::NetworkError.is_retryable());
        assert!(PaymentErrorCode::Timeout.is_retryable());
        assert!(PaymentErrorCode::RateLimitExceeded.is_retryable());

        assert!(!PaymentErrorCode::InvalidRequest.is_retryable());
        assert!(!PaymentErrorCode::InvalidWebhook.is_retryable());
    }

    #[test]
    fn payment_error_display() {
        let err = PaymentError::invalid_request("No such price: 'price_x'");
        assert!(err.to_string().contains("invalid_request"));
        assert!(err.to_string().contains("No such price"));
    }

    #[test]
    fn payment_error_converts_to_checkout_error_with_bare_message() {
        let err = PaymentError::invalid_request("No such price: 'price_x'")
            .with_provider_code("resource_missing");
        let checkout: CheckoutError = err.into();
        assert_eq!(checkout, CheckoutError::provider("No such price: 'price_x'"));
    }

    #[test]
    fn payment_error_converts_to_webhook_error() {
        let verification: WebhookError = PaymentError::invalid_webhook("bad sig").into();
        assert_eq!(verification, WebhookError::verification("bad sig"));

        let decode: WebhookError = PaymentError::invalid_payload("bad json").into();
        assert_eq!(decode, WebhookError::decode("bad json"));
    }
}
