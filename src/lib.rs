//! Paygate - Checkout sessions and verified payment webhooks
//!
//! This crate fronts a hosted payment provider: it exposes the publishable
//! key to browsers, creates hosted checkout sessions, and verifies and
//! dispatches the provider's signed webhook deliveries.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

use std::sync::Arc;

use axum::Router;

use adapters::events::TracingEventListener;
use adapters::http::{payment_router, PaymentAppState};
use adapters::stripe::{StripeConfig, StripePaymentAdapter};
use config::AppConfig;
use ports::PaymentError;

/// Build the production application: Stripe adapter, logging listener,
/// routes, and middleware.
///
/// # Errors
///
/// Returns `PaymentError` if the provider HTTP client cannot be built.
pub fn build_app(config: &AppConfig) -> Result<Router, PaymentError> {
    let provider = StripePaymentAdapter::new(StripeConfig::from(&config.payment))?;
    let state = PaymentAppState::from_config(
        config,
        Arc::new(provider),
        Arc::new(TracingEventListener::new()),
    );
    Ok(payment_router(state, &config.server))
}
