//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid public base URL (must be an absolute http(s) URL without trailing slash)")]
    InvalidPublicBaseUrl,

    #[error("Public base URL must use HTTPS in production")]
    PublicBaseUrlMustBeHttps,

    #[error("Invalid Stripe secret key format")]
    InvalidSecretKey,

    #[error("Invalid Stripe publishable key format")]
    InvalidPublishableKey,

    #[error("Invalid Stripe webhook secret format")]
    InvalidWebhookSecret,

    #[error("Invalid webhook tolerance")]
    InvalidWebhookTolerance,

    #[error("Invalid checkout quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Invalid redirect path: {0}")]
    InvalidRedirectPath(String),

    #[error("No payment method types configured")]
    NoPaymentMethodTypes,

    #[error("Catalog entry {0} has an empty price id")]
    EmptyCatalogPrice(String),
}
