//! In-memory payment event listener for testing.
//!
//! Records every dispatched event so tests can assert which listener method
//! ran and how often.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::webhook::{
    ChargeObject, CheckoutSessionObject, PaymentIntentObject, WebhookEvent,
};
use crate::ports::{ListenerError, PaymentEventListener};

/// A single listener invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Listener method that was invoked (e.g. `checkout_session_completed`).
    pub method: &'static str,
    pub event_type: String,
    pub event_id: Option<String>,
    /// Id of the typed object, when the method received one.
    pub object_id: Option<String>,
}

/// Listener that records invocations and optionally fails them.
///
/// # Example
///
/// ```ignore
/// let listener = Arc::new(RecordingEventListener::new());
///
/// handler.handle(cmd).await?;
///
/// assert_eq!(listener.count("checkout_session_completed"), 1);
/// ```
#[derive(Default)]
pub struct RecordingEventListener {
    recorded: RwLock<Vec<RecordedEvent>>,
    failure: RwLock<Option<ListenerError>>,
}

impl RecordingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener whose every method fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let listener = Self::new();
        *listener
            .failure
            .write()
            .expect("RecordingEventListener: failure write lock poisoned") =
            Some(ListenerError::new(message));
        listener
    }

    // === Test Helpers ===

    /// Returns all recorded invocations, oldest first.
    pub fn recorded(&self) -> Vec<RecordedEvent> {
        self.recorded
            .read()
            .expect("RecordingEventListener: recorded lock poisoned")
            .clone()
    }

    /// Number of times `method` was invoked.
    pub fn count(&self, method: &str) -> usize {
        self.recorded().iter().filter(|r| r.method == method).count()
    }

    /// Total number of invocations.
    pub fn total(&self) -> usize {
        self.recorded().len()
    }

    fn record(
        &self,
        method: &'static str,
        event: &WebhookEvent,
        object_id: Option<String>,
    ) -> Result<(), ListenerError> {
        self.recorded
            .write()
            .expect("RecordingEventListener: recorded write lock poisoned")
            .push(RecordedEvent {
                method,
                event_type: event.event_type().to_string(),
                event_id: event.id().map(str::to_string),
                object_id,
            });

        match self
            .failure
            .read()
            .expect("RecordingEventListener: failure lock poisoned")
            .as_ref()
        {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentEventListener for RecordingEventListener {
    async fn checkout_session_completed(
        &self,
        event: &WebhookEvent,
        session: CheckoutSessionObject,
    ) -> Result<(), ListenerError> {
        self.record("checkout_session_completed", event, session.id)
    }

    async fn payment_intent_succeeded(
        &self,
        event: &WebhookEvent,
        intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        self.record("payment_intent_succeeded", event, intent.id)
    }

    async fn payment_intent_created(
        &self,
        event: &WebhookEvent,
        intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        self.record("payment_intent_created", event, intent.id)
    }

    async fn payment_intent_payment_failed(
        &self,
        event: &WebhookEvent,
        intent: PaymentIntentObject,
    ) -> Result<(), ListenerError> {
        self.record("payment_intent_payment_failed", event, intent.id)
    }

    async fn charge_succeeded(
        &self,
        event: &WebhookEvent,
        charge: ChargeObject,
    ) -> Result<(), ListenerError> {
        self.record("charge_succeeded", event, charge.id)
    }

    async fn charge_updated(
        &self,
        event: &WebhookEvent,
        charge: ChargeObject,
    ) -> Result<(), ListenerError> {
        self.record("charge_updated", event, charge.id)
    }

    async fn unhandled(&self, event: &WebhookEvent) -> Result<(), ListenerError> {
        self.record("unhandled", event, None)
    }
}
