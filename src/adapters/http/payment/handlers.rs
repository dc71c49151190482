//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::checkout::{
    CheckoutSettings, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
};
use crate::application::handlers::webhook::{ReceiveWebhookCommand, ReceiveWebhookHandler};
use crate::config::AppConfig;
use crate::domain::checkout::{CheckoutError, CheckoutRequest};
use crate::domain::webhook::WebhookError;
use crate::domain::PublicConfig;
use crate::ports::{PaymentEventListener, PaymentProvider};

use super::super::origin::InboundOrigin;
use super::dto::{CheckoutSessionResponse, ErrorResponse, HealthResponse, WebhookReceivedResponse};

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Built once at startup and never mutated; cloning only bumps reference
/// counts.
#[derive(Clone)]
pub struct PaymentAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub event_listener: Arc<dyn PaymentEventListener>,
    pub checkout_settings: Arc<CheckoutSettings>,
    pub public_config: Arc<PublicConfig>,
}

impl PaymentAppState {
    /// Assemble state from configuration and the chosen adapters.
    pub fn from_config(
        config: &AppConfig,
        payment_provider: Arc<dyn PaymentProvider>,
        event_listener: Arc<dyn PaymentEventListener>,
    ) -> Self {
        Self {
            payment_provider,
            event_listener,
            checkout_settings: Arc::new(CheckoutSettings::from_config(
                &config.server,
                &config.checkout,
            )),
            public_config: Arc::new(PublicConfig::new(config.payment.publishable_key.clone())),
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn checkout_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(
            self.payment_provider.clone(),
            self.checkout_settings.clone(),
        )
    }

    pub fn webhook_handler(&self) -> ReceiveWebhookHandler {
        ReceiveWebhookHandler::new(self.payment_provider.clone(), self.event_listener.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /config - Publishable key for the browser
pub async fn get_config(State(state): State<PaymentAppState>) -> impl IntoResponse {
    Json(state.public_config.as_ref().clone())
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /create-checkout-session - Start hosted checkout
///
/// An empty body buys the default item. The body is parsed here rather than
/// with the `Json` extractor so a missing `Content-Type` is accepted.
pub async fn create_checkout_session(
    State(state): State<PaymentAppState>,
    InboundOrigin(origin): InboundOrigin,
    body: Bytes,
) -> Result<impl IntoResponse, CheckoutApiError> {
    let request = parse_checkout_request(&body)?;

    let handler = state.checkout_handler();
    let cmd = CreateCheckoutSessionCommand { request, origin };

    let session = handler.handle(cmd).await?;

    Ok(Json(CheckoutSessionResponse::from(session)))
}

/// POST /webhook - Receive a payment provider webhook
///
/// The body is taken as raw bytes; it must reach signature verification
/// exactly as sent.
pub async fn handle_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.webhook_handler();
    let cmd = ReceiveWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    handler.handle(cmd).await?;

    Ok(Json(WebhookReceivedResponse::received()))
}

fn parse_checkout_request(body: &[u8]) -> Result<CheckoutRequest, CheckoutError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckoutRequest::empty());
    }

    serde_json::from_slice(body)
        .map_err(|e| CheckoutError::validation(format!("Invalid request body: {}", e)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error for the checkout endpoint: JSON `{ "error": <message> }`.
#[derive(Debug)]
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

/// API error for the webhook endpoint: plain text `Webhook Error: <message>`.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_rejection() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, format!("Webhook Error: {}", self.0)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn blank_body_is_empty_request() {
        assert_eq!(parse_checkout_request(b"").unwrap(), CheckoutRequest::empty());
        assert_eq!(parse_checkout_request(b" \n").unwrap(), CheckoutRequest::empty());
        assert_eq!(parse_checkout_request(b"{}").unwrap(), CheckoutRequest::empty());
    }

    #[test]
    fn malformed_body_is_validation_error() {
        let err = parse_checkout_request(b"{items").unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn provider_error_is_500_json() {
        let response = CheckoutApiError::from(CheckoutError::provider("No such price")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, r#"{"error":"No such price"}"#);
    }

    #[tokio::test]
    async fn missing_origin_is_400_json() {
        let response = CheckoutApiError::from(CheckoutError::MissingOrigin).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, r#"{"error":"missing Host header"}"#);
    }

    #[tokio::test]
    async fn verification_error_is_400_text() {
        let response =
            WebhookApiError::from(WebhookError::verification("bad signature")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_string(response).await, "Webhook Error: bad signature");
    }

    #[tokio::test]
    async fn handler_error_is_500_text() {
        let response =
            WebhookApiError::from(WebhookError::handler("listener down")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Webhook Error: listener down");
    }
}
