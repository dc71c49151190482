//! Verified webhook event envelope.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::errors::WebhookError;
use super::kind::WebhookEventKind;

/// Event envelope as delivered by the provider.
///
/// Only `type` and `data.object` are required; fixtures and CLI-triggered
/// events routinely omit the rest.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    id: Option<String>,

    #[serde(rename = "type")]
    event_type: String,

    #[serde(default)]
    created: Option<i64>,

    #[serde(default)]
    livemode: bool,

    #[serde(default)]
    api_version: Option<String>,

    data: EventData,
}

/// Payload of an event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventData {
    /// The object the event is about (polymorphic by event type).
    pub object: serde_json::Value,

    /// Previous values of changed fields, on `*.updated` events.
    #[serde(default)]
    pub previous_attributes: Option<serde_json::Value>,
}

/// A webhook event whose signature has been verified.
///
/// Has no public constructor. Events are obtained only through a payment
/// provider's verification path.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    id: Option<String>,
    kind: WebhookEventKind,
    created: Option<i64>,
    livemode: bool,
    api_version: Option<String>,
    data: EventData,
}

impl WebhookEvent {
    /// Decode an envelope. Callers must have verified `payload` first.
    pub(crate) fn decode_verified(payload: &[u8]) -> Result<Self, WebhookError> {
        let envelope: Envelope = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::decode(format!("Invalid event payload: {}", e)))?;

        Ok(Self {
            id: envelope.id,
            kind: WebhookEventKind::from_tag(&envelope.event_type),
            created: envelope.created,
            livemode: envelope.livemode,
            api_version: envelope.api_version,
            data: envelope.data,
        })
    }

    /// Provider event id (evt_...), when present.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn kind(&self) -> &WebhookEventKind {
        &self.kind
    }

    /// Raw type tag.
    pub fn event_type(&self) -> &str {
        self.kind.as_str()
    }

    /// Creation time (Unix seconds), when present.
    pub fn created(&self) -> Option<i64> {
        self.created
    }

    pub fn livemode(&self) -> bool {
        self.livemode
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Deserialize `data.object` into a typed view.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Decode` when the object does not match `T`.
    pub fn object_as<T: DeserializeOwned>(&self) -> Result<T, WebhookError> {
        serde_json::from_value(self.data.object.clone()).map_err(|e| {
            WebhookError::decode(format!("Invalid {} object: {}", self.event_type(), e))
        })
    }
}
