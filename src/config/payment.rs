//! Payment configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Payment provider configuration (Stripe)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub secret_key: SecretString,

    /// Publishable key handed to the browser widget
    pub publishable_key: String,

    /// Webhook signing secret
    pub webhook_secret: SecretString,

    /// Base URL for the Stripe API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for calls to the Stripe API, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted age of a webhook signature timestamp, in seconds
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,

    /// Reject test mode events
    #[serde(default)]
    pub require_livemode: bool,
}

impl PaymentConfig {
    /// Build a configuration with defaults for everything but the keys.
    pub fn new(
        secret_key: impl Into<String>,
        publishable_key: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            publishable_key: publishable_key.into(),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            webhook_tolerance_secs: default_webhook_tolerance(),
            require_livemode: false,
        }
    }

    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        use secrecy::ExposeSecret;
        let key = self.secret_key.expose_secret();
        key.starts_with("sk_test_") || key.starts_with("rk_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        use secrecy::ExposeSecret;

        let secret_key = self.secret_key.expose_secret();
        let webhook_secret = self.webhook_secret.expose_secret();

        if secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__SECRET_KEY"));
        }
        if self.publishable_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PUBLISHABLE_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !(secret_key.starts_with("sk_") || secret_key.starts_with("rk_")) {
            return Err(ValidationError::InvalidSecretKey);
        }
        if !self.publishable_key.starts_with("pk_") {
            return Err(ValidationError::InvalidPublishableKey);
        }
        if !webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidWebhookSecret);
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.webhook_tolerance_secs <= 0 {
            return Err(ValidationError::InvalidWebhookTolerance);
        }

        Ok(())
    }
}

fn default_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_webhook_tolerance() -> i64 {
    300
}
