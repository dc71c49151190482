//! Checkout handlers.
//!
//! ## Commands
//! - Creating a provider-hosted checkout session

mod create_checkout_session;

pub use create_checkout_session::{
    CheckoutSettings, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
};
