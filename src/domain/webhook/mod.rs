//! Webhook domain module.
//!
//! Verified provider events, their type tags, and typed views of the
//! objects they carry.
//!
//! # Module Structure
//!
//! - `event` - WebhookEvent envelope (constructed only after verification)
//! - `kind` - WebhookEventKind tagged union
//! - `objects` - Lenient typed views over `data.object`
//! - `errors` - WebhookError

mod errors;
mod event;
mod kind;
mod objects;

pub use errors::WebhookError;
pub use event::{EventData, WebhookEvent};
pub use kind::WebhookEventKind;
pub use objects::{ChargeObject, CheckoutSessionObject, PaymentFailure, PaymentIntentObject};

/// Acknowledgement returned to the provider after a delivery is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookAck {
    /// Provider event id, when the envelope carried one.
    pub event_id: Option<String>,

    pub kind: WebhookEventKind,

    /// False when the event type has no dedicated handler.
    pub handled: bool,
}
