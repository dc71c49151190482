//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `stripe` - Stripe payment provider (and a mock for tests)
//! - `events` - Payment event listeners
//! - `http` - Axum REST API

pub mod events;
pub mod http;
pub mod stripe;

pub use events::{RecordingEventListener, TracingEventListener};
pub use stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
