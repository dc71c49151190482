//! Checkout request and line item resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;

/// Largest number of line items a single checkout may carry.
pub const MAX_LINE_ITEMS: usize = 20;

/// Largest quantity of a single line item.
pub const MAX_QUANTITY: u32 = 99;

/// A caller's request to start checkout.
///
/// An empty request (no body, `{}`, or `"items": []`) buys the configured
/// default item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<RequestedItem>,
}

/// An item the caller wants to buy, named by catalog SKU.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RequestedItem {
    pub sku: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// A priced line item ready to hand to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Provider price identifier.
    pub price_id: String,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(price_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            price_id: price_id.into(),
            quantity,
        }
    }
}

impl CheckoutRequest {
    /// Request with no items, meaning "the default item".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve requested SKUs into provider line items.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Validation` when a SKU is not in the catalog,
    /// a quantity is out of range, or too many items are requested.
    pub fn resolve_line_items(
        &self,
        default_item: &LineItem,
        catalog: &HashMap<String, String>,
    ) -> Result<Vec<LineItem>, CheckoutError> {
        if self.is_empty() {
            return Ok(vec![default_item.clone()]);
        }

        if self.items.len() > MAX_LINE_ITEMS {
            return Err(CheckoutError::validation(format!(
                "too many items (max {})",
                MAX_LINE_ITEMS
            )));
        }

        self.items
            .iter()
            .map(|item| {
                if item.quantity == 0 || item.quantity > MAX_QUANTITY {
                    return Err(CheckoutError::validation(format!(
                        "quantity for {} must be between 1 and {}",
                        item.sku, MAX_QUANTITY
                    )));
                }
                let price_id = catalog.get(&item.sku).ok_or_else(|| {
                    CheckoutError::validation(format!("unknown sku: {}", item.sku))
                })?;
                Ok(LineItem::new(price_id.clone(), item.quantity))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_item() -> LineItem {
        LineItem::new("price_default", 1)
    }

    fn catalog() -> HashMap<String, String> {
        HashMap::from([
            ("tshirt".to_string(), "price_tshirt".to_string()),
            ("mug".to_string(), "price_mug".to_string()),
        ])
    }

    #[test]
    fn empty_request_resolves_to_default_item() {
        let items = CheckoutRequest::empty()
            .resolve_line_items(&default_item(), &catalog())
            .unwrap();
        assert_eq!(items, vec![default_item()]);
    }

    #[test]
    fn empty_json_object_deserializes_to_empty_request() {
        let request: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(request.is_empty());
    }

    #[test]
    fn quantity_defaults_to_one() {
        let request: CheckoutRequest =
            serde_json::from_str(r#"{"items":[{"sku":"mug"}]}"#).unwrap();
        assert_eq!(request.items[0].quantity, 1);
    }

    #[test]
    fn known_skus_resolve_to_catalog_prices() {
        let request: CheckoutRequest = serde_json::from_str(
            r#"{"items":[{"sku":"tshirt","quantity":2},{"sku":"mug","quantity":1}]}"#,
        )
        .unwrap();

        let items = request
            .resolve_line_items(&default_item(), &catalog())
            .unwrap();

        assert_eq!(
            items,
            vec![LineItem::new("price_tshirt", 2), LineItem::new("price_mug", 1)]
        );
    }

    #[test]
    fn unknown_sku_is_rejected() {
        let request = CheckoutRequest {
            items: vec![RequestedItem {
                sku: "poster".to_string(),
                quantity: 1,
            }],
        };

        let err = request
            .resolve_line_items(&default_item(), &catalog())
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(ref m) if m.contains("poster")));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let request = CheckoutRequest {
            items: vec![RequestedItem {
                sku: "mug".to_string(),
                quantity: 0,
            }],
        };
        assert!(request
            .resolve_line_items(&default_item(), &catalog())
            .is_err());
    }

    #[test]
    fn excessive_quantity_is_rejected() {
        let request = CheckoutRequest {
            items: vec![RequestedItem {
                sku: "mug".to_string(),
                quantity: MAX_QUANTITY + 1,
            }],
        };
        assert!(request
            .resolve_line_items(&default_item(), &catalog())
            .is_err());
    }

    #[test]
    fn too_many_items_are_rejected() {
        let request = CheckoutRequest {
            items: vec![
                RequestedItem {
                    sku: "mug".to_string(),
                    quantity: 1,
                };
                MAX_LINE_ITEMS + 1
            ],
        };
        assert!(request
            .resolve_line_items(&default_item(), &catalog())
            .is_err());
    }
}
