//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe integration, including:
//! - Hosted checkout sessions (one-time payments)
//! - Webhook signature verification
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks (5-minute window)
//! - All secrets are handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! Read from the `payment` config section:
//! - `PAYGATE__PAYMENT__SECRET_KEY`: Stripe secret API key
//! - `PAYGATE__PAYMENT__WEBHOOK_SECRET`: Webhook signing secret (whsec_...)

mod api_types;
mod mock_payment_provider;
pub mod signature;
mod stripe_adapter;

pub use api_types::{StripeCheckoutSession, StripeErrorBody, StripeErrorDetail};
pub use mock_payment_provider::{MethodCall, MockPaymentProvider, MOCK_WEBHOOK_SECRET};
pub use signature::{sign_payload, SignatureError, SignatureHeader, SignatureParseError};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
