//! Checkout configuration

use std::collections::HashMap;

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::checkout::{SetupFutureUsage, MAX_QUANTITY};

/// Checkout session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// Price identifier used when the caller does not name any items
    pub price_id: String,

    /// Quantity of the default line item
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Locale code for the hosted checkout page
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Allowed payment method types (comma-separated)
    #[serde(default = "default_payment_method_types")]
    pub payment_method_types: String,

    /// Path appended to the base URL after a successful payment
    #[serde(default = "default_success_path")]
    pub success_path: String,

    /// Path appended to the base URL when the customer cancels
    #[serde(default = "default_cancel_path")]
    pub cancel_path: String,

    /// Save the card for reuse in later sessions
    pub setup_future_usage: Option<SetupFutureUsage>,

    /// Purchasable items by SKU, mapped to provider price identifiers
    #[serde(default)]
    pub catalog: HashMap<String, String>,
}

impl CheckoutConfig {
    /// Build a configuration selling a single price with defaults elsewhere.
    pub fn for_price(price_id: impl Into<String>) -> Self {
        Self {
            price_id: price_id.into(),
            quantity: default_quantity(),
            locale: default_locale(),
            payment_method_types: default_payment_method_types(),
            success_path: default_success_path(),
            cancel_path: default_cancel_path(),
            setup_future_usage: None,
            catalog: HashMap::new(),
        }
    }

    /// Get payment method types as a vector
    pub fn payment_method_types_list(&self) -> Vec<String> {
        self.payment_method_types
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validate checkout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.price_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CHECKOUT__PRICE_ID"));
        }
        if self.quantity == 0 || self.quantity > MAX_QUANTITY {
            return Err(ValidationError::InvalidQuantity(self.quantity));
        }
        for path in [&self.success_path, &self.cancel_path] {
            if !path.starts_with('/') {
                return Err(ValidationError::InvalidRedirectPath(path.clone()));
            }
        }
        if self.payment_method_types_list().is_empty() {
            return Err(ValidationError::NoPaymentMethodTypes);
        }
        if let Some((sku, _)) = self.catalog.iter().find(|(_, price)| price.trim().is_empty()) {
            return Err(ValidationError::EmptyCatalogPrice(sku.clone()));
        }
        Ok(())
    }
}

fn default_quantity() -> u32 {
    1
}

fn default_locale() -> String {
    "ja".to_string()
}

fn default_payment_method_types() -> String {
    "card".to_string()
}

fn default_success_path() -> String {
    "/success.html".to_string()
}

fn default_cancel_path() -> String {
    "/cancel.html".to_string()
}
