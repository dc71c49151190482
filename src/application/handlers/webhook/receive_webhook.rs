//! ReceiveWebhookHandler - Command handler for inbound payment webhooks.

use std::sync::Arc;

use crate::domain::webhook::{WebhookAck, WebhookError, WebhookEvent, WebhookEventKind};
use crate::ports::{ListenerError, PaymentEventListener, PaymentProvider};

/// Diagnostic for a delivery without a usable signature header.
const MISSING_SIGNATURE: &str =
    "No signatures found matching the expected signature for payload";

/// Command to handle a webhook delivery.
#[derive(Debug, Clone)]
pub struct ReceiveWebhookCommand {
    /// Raw request body, byte-exact as received.
    pub payload: Vec<u8>,
    /// Signature header value, if the request carried one.
    pub signature: Option<String>,
}

/// Handler for processing payment provider webhooks.
///
/// Verifies the delivery through the payment provider, then dispatches the
/// event to exactly one listener method. Duplicate deliveries are dispatched
/// again.
pub struct ReceiveWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    listener: Arc<dyn PaymentEventListener>,
}

impl ReceiveWebhookHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        listener: Arc<dyn PaymentEventListener>,
    ) -> Self {
        Self {
            payment_provider,
            listener,
        }
    }

    pub async fn handle(&self, cmd: ReceiveWebhookCommand) -> Result<WebhookAck, WebhookError> {
        // 1. A delivery without a signature is never looked at
        let signature = match cmd.signature.as_deref().map(str::trim) {
            Some(sig) if !sig.is_empty() => sig,
            _ => {
                tracing::warn!("Webhook delivery without signature header");
                return Err(WebhookError::verification(MISSING_SIGNATURE));
            }
        };

        // 2. Verify signature and decode event
        let event = self
            .payment_provider
            .construct_event(&cmd.payload, signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook verification failed");
                WebhookError::from(e)
            })?;

        tracing::info!(
            event_id = event.id().unwrap_or_default(),
            event_type = event.event_type(),
            recognized = event.kind().is_recognized(),
            "Received webhook event"
        );

        // 3. Dispatch
        let handled = self.dispatch(&event).await?;

        Ok(WebhookAck {
            event_id: event.id().map(str::to_string),
            kind: event.kind().clone(),
            handled,
        })
    }

    /// Invoke the listener method for the event's kind.
    ///
    /// Returns whether the kind has a dedicated method.
    async fn dispatch(&self, event: &WebhookEvent) -> Result<bool, WebhookError> {
        let listener = &self.listener;

        let result = match event.kind() {
            WebhookEventKind::CheckoutSessionCompleted => {
                listener
                    .checkout_session_completed(event, event.object_as()?)
                    .await
            }
            WebhookEventKind::PaymentIntentSucceeded => {
                listener.payment_intent_succeeded(event, event.object_as()?).await
            }
            WebhookEventKind::PaymentIntentCreated => {
                listener.payment_intent_created(event, event.object_as()?).await
            }
            WebhookEventKind::PaymentIntentPaymentFailed => {
                listener
                    .payment_intent_payment_failed(event, event.object_as()?)
                    .await
            }
            WebhookEventKind::ChargeSucceeded => {
                listener.charge_succeeded(event, event.object_as()?).await
            }
            WebhookEventKind::ChargeUpdated => {
                listener.charge_updated(event, event.object_as()?).await
            }
            WebhookEventKind::Other(_) => {
                return listener
                    .unhandled(event)
                    .await
                    .map(|()| false)
                    .map_err(|e| handler_failure(event, e));
            }
        };

        result
            .map(|()| true)
            .map_err(|e| handler_failure(event, e))
    }
}

fn handler_failure(event: &WebhookEvent, err: ListenerError) -> WebhookError {
    tracing::error!(
        event_id = event.id().unwrap_or_default(),
        event_type = event.event_type(),
        error = %err,
        "Webhook listener failed"
    );
    WebhookError::handler(err.message)
}
