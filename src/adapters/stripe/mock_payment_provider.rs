//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured checkout sessions
//! - Error injection
//! - Call tracking
//! - Real signature verification against a fixed test secret

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::webhook::WebhookEvent;
use crate::ports::{CreateCheckoutRequest, PaymentError, PaymentProvider, ProviderCheckoutSession};

use super::signature::{self, NO_MATCHING_SIGNATURE};

/// Webhook secret the mock verifies against.
pub const MOCK_WEBHOOK_SECRET: &str = "whsec_mock_secret";

/// Signature age the mock accepts.
const MOCK_TOLERANCE_SECS: i64 = 300;

/// Mock payment provider for testing.
///
/// Webhook deliveries are verified with the same HMAC code as the Stripe
/// adapter, so a mock never yields an event for an unsigned payload.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Sign a payload the mock will accept
/// let signature = mock.sign(payload);
///
/// // Inject errors
/// mock.set_error(PaymentError::invalid_request("No such price"));
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Next checkout session to return.
    next_checkout: Option<ProviderCheckoutSession>,

    /// Counter for generated session ids.
    sessions_created: u32,

    /// Requests received by `create_checkout_session`.
    checkout_requests: Vec<CreateCheckoutRequest>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,

    /// Webhook verification behavior.
    webhook_verify_mode: WebhookVerifyMode,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
}

/// How to handle webhook verification.
#[derive(Default, Clone, Copy)]
enum WebhookVerifyMode {
    /// Verify against `MOCK_WEBHOOK_SECRET`.
    #[default]
    Verify,

    /// Always fail verification.
    AlwaysFail,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().webhook_verify_mode = WebhookVerifyMode::AlwaysFail;
        mock
    }

    /// Signature header for `payload`, timestamped now.
    pub fn sign(&self, payload: &[u8]) -> String {
        signature::sign_payload(
            MOCK_WEBHOOK_SECRET,
            chrono::Utc::now().timestamp(),
            payload,
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the checkout session to return on the next call.
    pub fn set_checkout_session(&self, session: ProviderCheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Checkout requests received so far, oldest first.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        let mut state = self.inner.lock().unwrap();
        state.call_log.clear();
        state.checkout_requests.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        // Check method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<ProviderCheckoutSession, PaymentError> {
        self.record_call("create_checkout_session");
        self.check_error("create_checkout_session")?;

        let mut state = self.inner.lock().unwrap();
        state.checkout_requests.push(request);

        if let Some(session) = state.next_checkout.take() {
            return Ok(session);
        }

        state.sessions_created += 1;
        let id = format!("cs_test_mock_{}", state.sessions_created);
        Ok(ProviderCheckoutSession {
            url: Some(format!("https://checkout.stripe.com/c/pay/{}", id)),
            id,
        })
    }

    async fn construct_event(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record_call("construct_event");
        self.check_error("construct_event")?;

        let mode = self.inner.lock().unwrap().webhook_verify_mode;
        if let WebhookVerifyMode::AlwaysFail = mode {
            return Err(PaymentError::invalid_webhook(NO_MATCHING_SIGNATURE));
        }

        signature::verify_header(
            MOCK_WEBHOOK_SECRET,
            payload,
            signature_header,
            MOCK_TOLERANCE_SECS,
            chrono::Utc::now().timestamp(),
        )
        .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;

        WebhookEvent::decode_verified(payload)
            .map_err(|e| PaymentError::invalid_payload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::LineItem;
    use crate::ports::PaymentErrorCode;

    fn checkout_request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            payment_method_types: vec!["card".to_string()],
            line_items: vec![LineItem::new("price_123", 1)],
            locale: "ja".to_string(),
            success_url: "http://localhost/success.html".to_string(),
            cancel_url: "http://localhost/cancel.html".to_string(),
            setup_future_usage: None,
        }
    }

    #[tokio::test]
    async fn generates_distinct_session_ids() {
        let mock = MockPaymentProvider::new();

        let first = mock.create_checkout_session(checkout_request()).await.unwrap();
        let second = mock.create_checkout_session(checkout_request()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(mock.call_count("create_checkout_session"), 2);
        assert_eq!(mock.checkout_requests().len(), 2);
    }

    #[tokio::test]
    async fn returns_configured_session() {
        let mock = MockPaymentProvider::new();
        mock.set_checkout_session(ProviderCheckoutSession {
            id: "cs_fixed".to_string(),
            url: None,
        });

        let session = mock.create_checkout_session(checkout_request()).await.unwrap();
        assert_eq!(session.id, "cs_fixed");
    }

    #[tokio::test]
    async fn global_error_is_consumed() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::invalid_request("No such price"));

        assert!(mock.create_checkout_session(checkout_request()).await.is_err());
        assert!(mock.create_checkout_session(checkout_request()).await.is_ok());
    }

    #[tokio::test]
    async fn method_error_persists_until_cleared() {
        let mock = MockPaymentProvider::new();
        mock.set_method_error("create_checkout_session", PaymentError::network("down"));

        assert!(mock.create_checkout_session(checkout_request()).await.is_err());
        assert!(mock.create_checkout_session(checkout_request()).await.is_err());

        mock.clear_errors();
        assert!(mock.create_checkout_session(checkout_request()).await.is_ok());
    }

    #[tokio::test]
    async fn accepts_payload_signed_with_mock_secret() {
        let mock = MockPaymentProvider::new();
        let payload = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_test_1"}}}"#;

        let event = mock.construct_event(payload, &mock.sign(payload)).await.unwrap();

        assert_eq!(event.event_type(), "checkout.session.completed");
        assert!(mock.was_called("construct_event"));
    }

    #[tokio::test]
    async fn rejects_payload_signed_with_other_secret() {
        let mock = MockPaymentProvider::new();
        let payload = br#"{"type":"charge.updated","data":{"object":{}}}"#;
        let signature =
            signature::sign_payload("whsec_other", chrono::Utc::now().timestamp(), payload);

        let err = mock.construct_event(payload, &signature).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn rejecting_mock_fails_even_valid_signatures() {
        let mock = MockPaymentProvider::rejecting_webhooks();
        let payload = br#"{"type":"charge.updated","data":{"object":{}}}"#;

        let err = mock
            .construct_event(payload, &mock.sign(payload))
            .await
            .unwrap_err();
        assert_eq!(err.message, NO_MATCHING_SIGNATURE);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let mock = MockPaymentProvider::new();
        let clone = mock.clone();

        clone.create_checkout_session(checkout_request()).await.unwrap();

        assert!(mock.was_called("create_checkout_session"));
        mock.clear_calls();
        assert!(clone.calls().is_empty());
    }
}
