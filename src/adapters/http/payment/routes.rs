//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::config::ServerConfig;

use super::super::middleware::with_middleware;
use super::handlers::{
    create_checkout_session, get_config, handle_webhook, health, PaymentAppState,
};

/// Create the payment API router.
///
/// # Routes
///
/// - `GET /config` - Publishable key for the browser
/// - `POST /create-checkout-session` - Start hosted checkout
/// - `POST /webhook` - Provider webhooks (signature verified, raw body)
/// - `GET /health` - Liveness probe
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health))
}

/// Create the complete application router with state and middleware.
///
/// # Example
///
/// ```ignore
/// let state = PaymentAppState::from_config(&config, provider, listener);
/// let app = payment_router(state, &config.server);
/// axum::serve(listener, app).await?;
/// ```
pub fn payment_router(state: PaymentAppState, server: &ServerConfig) -> Router {
    with_middleware(payment_routes().with_state(state), server)
}
