//! Payment HTTP module.
//!
//! Exposes the browser-facing config endpoint, checkout session creation,
//! and the provider webhook receiver.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{CheckoutApiError, PaymentAppState, WebhookApiError, SIGNATURE_HEADER};
pub use routes::{payment_router, payment_routes};
