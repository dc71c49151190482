//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod checkout;
pub mod webhook;

pub use checkout::{CheckoutSettings, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler};
pub use webhook::{ReceiveWebhookCommand, ReceiveWebhookHandler};
