//! HTTP adapters - REST API implementations.

pub mod middleware;
pub mod origin;
pub mod payment;

// Re-export key types for convenience
pub use origin::InboundOrigin;
pub use payment::{payment_router, PaymentAppState};
