//! Default payment event listener that records events as structured logs.

use async_trait::async_trait;

use crate::domain::webhook::{
    ChargeObject, CheckoutSessionObject, PaymentIntentObject, WebhookEvent,
};
use crate::ports::{ListenerError, PaymentEventListener};

/// Logs each verified event and never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventListener;

impl TracingEventListener {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentEventListener for TracingEventListener {
    async fn checkout_session_completed(
        &self,
        event: &WebhookEvent,
        session: CheckoutSessionObject,
    ) -> Result<(), ListenerError> {
        tracing::info!(
            event_id = event.id().unwrap_or_default(),
            session_id = session.id.as_deref().unwrap_or_default(),
            payment_status = session.payment_status.as_deref().unwrap_or_default(),
            amount_total = session.amount_total,
            currency = session.currency.as_deref().unwrap_or_default(),
            "Checkout session completed"
        );
        Ok(())
    }

    async fn payment_intent_succeeded(
        &self,
        event: &WebhookEvent,
        intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        tracing::info!(
            event_id = event.id().unwrap_or_default(),
            payment_intent_id = intent.id.as_deref().unwrap_or_default(),
            amount = intent.amount,
            currency = intent.currency.as_deref().unwrap_or_default(),
            "Payment intent succeeded"
        );
        Ok(())
    }

    async fn payment_intent_created(
        &self,
        event: &WebhookEvent,
        intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        tracing::debug!(
            event_id = event.id().unwrap_or_default(),
            payment_intent_id = intent.id.as_deref().unwrap_or_default(),
            "Payment intent created"
        );
        Ok(())
    }

    async fn payment_intent_payment_failed(
        &self,
        event: &WebhookEvent,
        intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        let failure = intent.last_payment_error.unwrap_or_default();
        tracing::warn!(
            event_id = event.id().unwrap_or_default(),
            payment_intent_id = intent.id.as_deref().unwrap_or_default(),
            failure_code = failure.code.as_deref().unwrap_or_default(),
            decline_code = failure.decline_code.as_deref().unwrap_or_default(),
            failure_message = failure.message.as_deref().unwrap_or_default(),
            "Payment failed"
        );
        Ok(())
    }

    async fn charge_succeeded(
        &self,
        event: &WebhookEvent,
        charge: ChargeObject,
    ) -> Result<(), ListenerError> {
        tracing::info!(
            event_id = event.id().unwrap_or_default(),
            charge_id = charge.id.as_deref().unwrap_or_default(),
            amount = charge.amount,
            payment_intent_id = charge.payment_intent.as_deref().unwrap_or_default(),
            "Charge succeeded"
        );
        Ok(())
    }

    async fn charge_updated(
        &self,
        event: &WebhookEvent,
        charge: ChargeObject,
    ) -> Result<(), ListenerError> {
        tracing::debug!(
            event_id = event.id().unwrap_or_default(),
            charge_id = charge.id.as_deref().unwrap_or_default(),
            status = charge.status.as_deref().unwrap_or_default(),
            "Charge updated"
        );
        Ok(())
    }

    async fn unhandled(&self, event: &WebhookEvent) -> Result<(), ListenerError> {
        tracing::debug!(
            event_id = event.id().unwrap_or_default(),
            event_type = event.event_type(),
            "Unhandled event type"
        );
        Ok(())
    }
}
