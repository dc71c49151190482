//! CreateCheckoutSessionHandler - Command handler for starting hosted checkout.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{CheckoutConfig, ServerConfig};
use crate::domain::checkout::{
    CheckoutError, CheckoutRequest, CheckoutSession, LineItem, RedirectBase, RedirectUrls,
    RequestOrigin, SetupFutureUsage,
};
use crate::ports::{CreateCheckoutRequest, PaymentProvider};

/// Checkout parameters fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub redirect_base: RedirectBase,
    /// Item bought when the request names none.
    pub default_item: LineItem,
    /// SKU to provider price id.
    pub catalog: HashMap<String, String>,
    pub payment_method_types: Vec<String>,
    pub locale: String,
    pub success_path: String,
    pub cancel_path: String,
    pub setup_future_usage: Option<SetupFutureUsage>,
}

impl CheckoutSettings {
    /// Derive settings from validated configuration.
    ///
    /// Production redirects to the configured public base URL; every other
    /// environment redirects back to the origin of the request.
    pub fn from_config(server: &ServerConfig, checkout: &CheckoutConfig) -> Self {
        let redirect_base = match (&server.public_base_url, server.is_production()) {
            (Some(url), true) => RedirectBase::Fixed(url.clone()),
            _ => RedirectBase::FromRequest,
        };

        Self {
            redirect_base,
            default_item: LineItem::new(checkout.price_id.clone(), checkout.quantity),
            catalog: checkout.catalog.clone(),
            payment_method_types: checkout.payment_method_types_list(),
            locale: checkout.locale.clone(),
            success_path: checkout.success_path.clone(),
            cancel_path: checkout.cancel_path.clone(),
            setup_future_usage: checkout.setup_future_usage,
        }
    }
}

/// Command to create a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    pub request: CheckoutRequest,
    /// Scheme and host the request arrived on, if known.
    pub origin: Option<RequestOrigin>,
}

/// Handler for creating provider-hosted checkout sessions.
///
/// Each call creates a fresh session; nothing is persisted and failures are
/// not retried.
pub struct CreateCheckoutSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    settings: Arc<CheckoutSettings>,
}

impl CreateCheckoutSessionHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, settings: Arc<CheckoutSettings>) -> Self {
        Self {
            payment_provider,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CheckoutSession, CheckoutError> {
        let settings = &self.settings;

        // 1. Resolve what is being bought
        let line_items = cmd
            .request
            .resolve_line_items(&settings.default_item, &settings.catalog)?;

        // 2. Resolve where the customer returns to
        let base_url = settings.redirect_base.resolve(cmd.origin.as_ref())?;
        let urls = RedirectUrls::from_base(&base_url, &settings.success_path, &settings.cancel_path);

        // 3. Ask the provider for a session
        let provider_request = CreateCheckoutRequest {
            payment_method_types: settings.payment_method_types.clone(),
            line_items,
            locale: settings.locale.clone(),
            success_url: urls.success_url.clone(),
            cancel_url: urls.cancel_url.clone(),
            setup_future_usage: settings.setup_future_usage,
        };

        let session = self
            .payment_provider
            .create_checkout_session(provider_request)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    provider_code = e.provider_code.as_deref().unwrap_or_default(),
                    "Failed to create checkout session"
                );
                CheckoutError::from(e)
            })?;

        tracing::info!(
            session_id = %session.id,
            success_url = %urls.success_url,
            "Checkout session created"
        );

        Ok(CheckoutSession {
            id: session.id,
            url: session.url,
            success_url: urls.success_url,
            cancel_url: urls.cancel_url,
            locale: settings.locale.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::config::Environment;
    use crate::domain::checkout::RequestedItem;
    use crate::ports::PaymentError;

    fn settings() -> CheckoutSettings {
        let mut checkout = CheckoutConfig::for_price("price_default");
        checkout
            .catalog
            .insert("tshirt".to_string(), "price_tshirt".to_string());
        CheckoutSettings::from_config(&ServerConfig::default(), &checkout)
    }

    fn handler_with(mock: &MockPaymentProvider, settings: CheckoutSettings) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(Arc::new(mock.clone()), Arc::new(settings))
    }

    fn local_origin() -> Option<RequestOrigin> {
        Some(RequestOrigin::new("http", "localhost:3000"))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Settings Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn development_settings_redirect_to_request_origin() {
        let settings = settings();
        assert_eq!(settings.redirect_base, RedirectBase::FromRequest);
        assert_eq!(settings.default_item, LineItem::new("price_default", 1));
        assert_eq!(settings.payment_method_types, vec!["card".to_string()]);
        assert_eq!(settings.locale, "ja");
    }

    #[test]
    fn production_settings_use_public_base_url() {
        let server = ServerConfig {
            environment: Environment::Production,
            public_base_url: Some("https://shop.example.com".to_string()),
            ..ServerConfig::default()
        };
        let settings =
            CheckoutSettings::from_config(&server, &CheckoutConfig::for_price("price_default"));

        assert_eq!(
            settings.redirect_base,
            RedirectBase::Fixed("https://shop.example.com".to_string())
        );
    }

    #[test]
    fn public_base_url_is_ignored_outside_production() {
        let server = ServerConfig {
            public_base_url: Some("https://shop.example.com".to_string()),
            ..ServerConfig::default()
        };
        let settings =
            CheckoutSettings::from_config(&server, &CheckoutConfig::for_price("price_default"));

        assert_eq!(settings.redirect_base, RedirectBase::FromRequest);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn empty_request_buys_default_item() {
        let mock = MockPaymentProvider::new();
        let handler = handler_with(&mock, settings());

        let session = handler
            .handle(CreateCheckoutSessionCommand {
                request: CheckoutRequest::empty(),
                origin: local_origin(),
            })
            .await
            .unwrap();

        assert!(session.id.starts_with("cs_test_mock_"));
        assert_eq!(session.success_url, "http://localhost:3000/success.html");
        assert_eq!(session.cancel_url, "http://localhost:3000/cancel.html");

        let requests = mock.checkout_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].line_items, vec![LineItem::new("price_default", 1)]);
        assert_eq!(requests[0].locale, "ja");
        assert_eq!(requests[0].payment_method_types, vec!["card".to_string()]);
    }

    #[tokio::test]
    async fn catalog_items_are_priced() {
        let mock = MockPaymentProvider::new();
        let handler = handler_with(&mock, settings());

        handler
            .handle(CreateCheckoutSessionCommand {
                request: CheckoutRequest {
                    items: vec![RequestedItem {
                        sku: "tshirt".to_string(),
                        quantity: 3,
                    }],
                },
                origin: local_origin(),
            })
            .await
            .unwrap();

        assert_eq!(
            mock.checkout_requests()[0].line_items,
            vec![LineItem::new("price_tshirt", 3)]
        );
    }

    #[tokio::test]
    async fn unknown_sku_never_reaches_provider() {
        let mock = MockPaymentProvider::new();
        let handler = handler_with(&mock, settings());

        let err = handler
            .handle(CreateCheckoutSessionCommand {
                request: CheckoutRequest {
                    items: vec![RequestedItem {
                        sku: "hoodie".to_string(),
                        quantity: 1,
                    }],
                },
                origin: local_origin(),
            })
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(!mock.was_called("create_checkout_session"));
    }

    #[tokio::test]
    async fn missing_origin_is_rejected_in_development() {
        let mock = MockPaymentProvider::new();
        let handler = handler_with(&mock, settings());

        let err = handler
            .handle(CreateCheckoutSessionCommand {
                request: CheckoutRequest::empty(),
                origin: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::MissingOrigin);
        assert!(!mock.was_called("create_checkout_session"));
    }

    #[tokio::test]
    async fn production_ignores_request_origin() {
        let mock = MockPaymentProvider::new();
        let mut settings = settings();
        settings.redirect_base = RedirectBase::Fixed("https://shop.example.com".to_string());
        let handler = handler_with(&mock, settings);

        let session = handler
            .handle(CreateCheckoutSessionCommand {
                request: CheckoutRequest::empty(),
                origin: Some(RequestOrigin::new("http", "internal:8080")),
            })
            .await
            .unwrap();

        assert_eq!(session.success_url, "https://shop.example.com/success.html");
        assert_eq!(session.cancel_url, "https://shop.example.com/cancel.html");
    }

    #[tokio::test]
    async fn provider_failure_carries_provider_message() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::invalid_request("No such price: 'price_default'"));
        let handler = handler_with(&mock, settings());

        let err = handler
            .handle(CreateCheckoutSessionCommand {
                request: CheckoutRequest::empty(),
                origin: local_origin(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::provider("No such price: 'price_default'")
        );
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn setup_future_usage_is_forwarded() {
        let mock = MockPaymentProvider::new();
        let mut settings = settings();
        settings.setup_future_usage = Some(SetupFutureUsage::OnSession);
        let handler = handler_with(&mock, settings);

        handler
            .handle(CreateCheckoutSessionCommand {
                request: CheckoutRequest::empty(),
                origin: local_origin(),
            })
            .await
            .unwrap();

        assert_eq!(
            mock.checkout_requests()[0].setup_future_usage,
            Some(SetupFutureUsage::OnSession)
        );
    }
}
