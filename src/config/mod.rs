//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAYGATE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paygate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod checkout;
mod error;
mod payment;
mod server;

pub use checkout::CheckoutConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment provider configuration (Stripe keys and webhook secret)
    pub payment: PaymentConfig,

    /// Checkout session configuration (catalog, locale, redirects)
    pub checkout: CheckoutConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYGATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYGATE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PAYGATE__PAYMENT__SECRET_KEY=...` -> `payment.secret_key = ...`
    /// - `PAYGATE__CHECKOUT__CATALOG__TSHIRT=price_...` -> `checkout.catalog["tshirt"]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAYGATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step.
    ///
    /// Misconfiguration is fatal: callers should refuse to start on error.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.checkout.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::SetupFutureUsage;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const MINIMAL_ENV: &[(&str, &str)] = &[
        ("PAYGATE__PAYMENT__SECRET_KEY", "sk_test_xxx"),
        ("PAYGATE__PAYMENT__PUBLISHABLE_KEY", "pk_test_xxx"),
        ("PAYGATE__PAYMENT__WEBHOOK_SECRET", "whsec_xxx"),
        ("PAYGATE__CHECKOUT__PRICE_ID", "price_default"),
    ];

    const OPTIONAL_ENV: &[&str] = &[
        "PAYGATE__SERVER__PORT",
        "PAYGATE__SERVER__ENVIRONMENT",
        "PAYGATE__SERVER__PUBLIC_BASE_URL",
        "PAYGATE__CHECKOUT__CATALOG__TSHIRT",
        "PAYGATE__CHECKOUT__SETUP_FUTURE_USAGE",
    ];

    fn set_minimal_env() {
        for (key, value) in MINIMAL_ENV {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in MINIMAL_ENV {
            env::remove_var(key);
        }
        for key in OPTIONAL_ENV {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.publishable_key, "pk_test_xxx");
        assert_eq!(config.checkout.price_id, "price_default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PAYGATE__SERVER__PORT", "8080");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 8080);
    }

    #[test]
    fn test_catalog_and_setup_future_usage_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PAYGATE__CHECKOUT__CATALOG__TSHIRT", "price_tshirt");
        env::set_var("PAYGATE__CHECKOUT__SETUP_FUTURE_USAGE", "on_session");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.checkout.catalog.get("tshirt").map(String::as_str),
            Some("price_tshirt")
        );
        assert_eq!(
            config.checkout.setup_future_usage,
            Some(SetupFutureUsage::OnSession)
        );
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PAYGATE__CHECKOUT__PRICE_ID", "price_default");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_production_without_base_url_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PAYGATE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }
}
