//! PaymentEventListener port - Reactions to verified payment events.
//!
//! The webhook handler dispatches each verified event to exactly one method
//! of this trait. Every method has a default no-op body, so adding a new
//! event kind does not break existing listeners.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::webhook::{
    ChargeObject, CheckoutSessionObject, PaymentIntentObject, WebhookEvent,
};

/// Failure reported by a listener.
///
/// Surfaces as a 5xx so the provider redelivers the event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListenerError {
    pub message: String,
}

impl ListenerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Port for reacting to verified payment events.
///
/// Delivery is at-least-once: implementations must tolerate receiving the
/// same event more than once.
#[async_trait]
pub trait PaymentEventListener: Send + Sync {
    /// Customer completed the hosted checkout page.
    async fn checkout_session_completed(
        &self,
        _event: &WebhookEvent,
        _session: CheckoutSessionObject,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    async fn payment_intent_succeeded(
        &self,
        _event: &WebhookEvent,
        _intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    async fn payment_intent_created(
        &self,
        _event: &WebhookEvent,
        _intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    /// A payment attempt failed; `last_payment_error` carries the reason.
    async fn payment_intent_payment_failed(
        &self,
        _event: &WebhookEvent,
        _intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    async fn charge_succeeded(
        &self,
        _event: &WebhookEvent,
        _charge: ChargeObject,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    async fn charge_updated(
        &self,
        _event: &WebhookEvent,
        _charge: ChargeObject,
    ) -> Result<(), ListenerError> {
        Ok(())
    }

    /// Any event type without a dedicated method.
    async fn unhandled(&self, _event: &WebhookEvent) -> Result<(), ListenerError> {
        Ok(())
    }
}
