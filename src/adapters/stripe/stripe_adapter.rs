//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait for Stripe API integration:
//! hosted checkout session creation and webhook verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window by default) for replay prevention
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::from(&app_config.payment);
//! let adapter = StripePaymentAdapter::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::config::PaymentConfig;
use crate::domain::webhook::WebhookEvent;
use crate::ports::{
    CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    ProviderCheckoutSession,
};

use super::api_types::{StripeCheckoutSession, StripeErrorBody};
use super::signature::{self, SignatureHeader};

/// Default maximum age for webhook events (5 minutes).
const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Default timeout for Stripe API calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Upper bound on a single API call.
    request_timeout: Duration,

    /// Maximum accepted age of a webhook signature.
    webhook_tolerance_secs: i64,

    /// Whether to reject test-mode events.
    require_livemode: bool,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            webhook_tolerance_secs: DEFAULT_TOLERANCE_SECS,
            require_livemode: false,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Require livemode events.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_webhook_tolerance(mut self, secs: i64) -> Self {
        self.webhook_tolerance_secs = secs;
        self
    }
}

impl From<&PaymentConfig> for StripeConfig {
    fn from(config: &PaymentConfig) -> Self {
        Self {
            api_key: config.secret_key.clone(),
            webhook_secret: config.webhook_secret.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            webhook_tolerance_secs: config.webhook_tolerance_secs,
            require_livemode: config.require_livemode,
        }
    }
}

/// Stripe payment provider adapter.
///
/// Implements `PaymentProvider` for Stripe API integration.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    ///
    /// The HTTP client (and its connection pool) is built once and shared by
    /// every request.
    pub fn new(config: StripeConfig) -> Result<Self, PaymentError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Verify the signature, then decode the event.
    fn construct_event_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<WebhookEvent, PaymentError> {
        // 1. Parse signature header
        let header = SignatureHeader::parse(signature_header).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        // 2. Verify signature (includes timestamp validation)
        signature::verify(
            self.config.webhook_secret.expose_secret(),
            payload,
            &header,
            self.config.webhook_tolerance_secs,
            now,
        )
        .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;

        // 3. Decode the envelope
        let event = WebhookEvent::decode_verified(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_payload(e.to_string())
        })?;

        if self.config.require_livemode && !event.livemode() {
            tracing::warn!(
                event_id = event.id().unwrap_or_default(),
                "Rejected test mode event"
            );
            return Err(PaymentError::invalid_webhook(
                "Test mode events are not accepted",
            ));
        }

        tracing::info!(
            event_id = event.id().unwrap_or_default(),
            event_type = event.event_type(),
            "Webhook signature verified"
        );

        Ok(event)
    }
}

/// Form-encoded body for `POST /v1/checkout/sessions`.
pub(crate) fn checkout_form_params(request: &CreateCheckoutRequest) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for (i, method) in request.payment_method_types.iter().enumerate() {
        params.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    for (i, item) in request.line_items.iter().enumerate() {
        params.push((format!("line_items[{}][price]", i), item.price_id.clone()));
        params.push((
            format!("line_items[{}][quantity]", i),
            item.quantity.to_string(),
        ));
    }

    params.push(("mode".to_string(), "payment".to_string()));
    params.push(("locale".to_string(), request.locale.clone()));
    params.push(("success_url".to_string(), request.success_url.clone()));
    params.push(("cancel_url".to_string(), request.cancel_url.clone()));

    if let Some(usage) = request.setup_future_usage {
        params.push((
            "payment_method_options[card][setup_future_usage]".to_string(),
            usage.as_str().to_string(),
        ));
    }

    params
}

/// Map a non-2xx Stripe response to a `PaymentError`.
///
/// The caller-facing message is Stripe's own `error.message` when the body
/// carries one.
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> PaymentError {
    let detail = serde_json::from_str::<StripeErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_default();

    let message = detail
        .message
        .unwrap_or_else(|| format!("Stripe API error (status {})", status.as_u16()));

    let code = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PaymentErrorCode::AuthenticationError,
        StatusCode::TOO_MANY_REQUESTS => PaymentErrorCode::RateLimitExceeded,
        StatusCode::BAD_REQUEST | StatusCode::PAYMENT_REQUIRED | StatusCode::NOT_FOUND => {
            PaymentErrorCode::InvalidRequest
        }
        _ => PaymentErrorCode::ProviderError,
    };

    tracing::warn!(
        status = status.as_u16(),
        code = %code,
        provider_code = detail.code.as_deref().unwrap_or_default(),
        error_type = detail.error_type.as_deref().unwrap_or_default(),
        param = detail.param.as_deref().unwrap_or_default(),
        "Stripe rejected checkout session"
    );

    let error = PaymentError::new(code, message);
    match detail.code {
        Some(provider_code) => error.with_provider_code(provider_code),
        None => error,
    }
}

fn error_from_transport(err: reqwest::Error) -> PaymentError {
    if err.is_timeout() {
        PaymentError::timeout("Request to Stripe timed out")
    } else {
        PaymentError::network(err.to_string())
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<ProviderCheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let params = checkout_form_params(&request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(error_from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(ProviderCheckoutSession {
            id: session.id,
            url: session.url,
        })
    }

    async fn construct_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.construct_event_at(payload, signature, chrono::Utc::now().timestamp())
    }
}
