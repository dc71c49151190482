//! Webhook error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Verification | 400 |
//! | Decode | 400 |
//! | Handler | 500 |

use thiserror::Error;

/// Errors from receiving a webhook delivery.
///
/// `Display` renders only the diagnostic; the HTTP layer adds the
/// `Webhook Error:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// Signature missing, malformed, stale, or not matching the secret.
    #[error("{0}")]
    Verification(String),

    /// Signature valid but the envelope or event object is not decodable.
    #[error("{0}")]
    Decode(String),

    /// A listener failed while handling a verified event.
    #[error("{0}")]
    Handler(String),
}

impl WebhookError {
    pub fn verification(message: impl Into<String>) -> Self {
        WebhookError::Verification(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        WebhookError::Decode(message.into())
    }

    pub fn handler(message: impl Into<String>) -> Self {
        WebhookError::Handler(message.into())
    }

    /// Whether the delivery itself is bad and retrying it cannot help.
    pub fn is_rejection(&self) -> bool {
        matches!(self, WebhookError::Verification(_) | WebhookError::Decode(_))
    }
}
