//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `checkout` - Checkout requests, line items, redirect URLs, sessions
//! - `webhook` - Verified webhook events and their type tags
//! - `public_config` - Browser-facing configuration

pub mod checkout;
pub mod public_config;
pub mod webhook;

pub use public_config::PublicConfig;
