//! Checkout error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | MissingOrigin | 400 |
//! | Provider | 500 |

use thiserror::Error;

/// Errors from starting a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The request named items or quantities the catalog cannot satisfy.
    #[error("{0}")]
    Validation(String),

    /// Redirect URLs must come from the request, but it carried no host.
    #[error("missing Host header")]
    MissingOrigin,

    /// The payment provider rejected or failed the session creation call.
    #[error("{0}")]
    Provider(String),
}

impl CheckoutError {
    pub fn validation(message: impl Into<String>) -> Self {
        CheckoutError::Validation(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        CheckoutError::Provider(message.into())
    }

    /// Whether the caller, rather than the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CheckoutError::Validation(_) | CheckoutError::MissingOrigin
        )
    }
}
