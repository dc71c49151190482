//! Webhook handlers.
//!
//! ## Commands
//! - Verifying and dispatching payment provider webhook deliveries

mod receive_webhook;

pub use receive_webhook::{ReceiveWebhookCommand, ReceiveWebhookHandler};
