//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentProvider` - Checkout session creation and webhook verification
//! - `PaymentEventListener` - Reactions to verified payment events

mod payment_event_listener;
mod payment_provider;

pub use payment_event_listener::{ListenerError, PaymentEventListener};
pub use payment_provider::{
    CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    ProviderCheckoutSession,
};
