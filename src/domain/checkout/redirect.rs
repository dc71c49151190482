//! Redirect URL computation for hosted checkout.
//!
//! Production deployments redirect to a fixed public base URL. Everywhere
//! else the base URL is derived from the scheme and host the request
//! arrived on, so local and preview deployments redirect back to themselves.

use serde::{Deserialize, Serialize};

use super::errors::CheckoutError;

/// Scheme and host an inbound request was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// `<scheme>://<host>` with no trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Where the redirect base URL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectBase {
    /// A fixed public URL (production).
    Fixed(String),
    /// The origin of the inbound request (development, staging).
    FromRequest,
}

impl RedirectBase {
    /// Resolve the base URL for a request.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingOrigin` when the base must come from
    /// the request but the request carried no host.
    pub fn resolve(&self, origin: Option<&RequestOrigin>) -> Result<String, CheckoutError> {
        match self {
            RedirectBase::Fixed(url) => Ok(url.clone()),
            RedirectBase::FromRequest => origin
                .map(RequestOrigin::base_url)
                .ok_or(CheckoutError::MissingOrigin),
        }
    }
}

/// Success and cancel URLs for a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl RedirectUrls {
    pub fn from_base(base_url: &str, success_path: &str, cancel_path: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            success_url: format!("{}{}", base, success_path),
            cancel_url: format!("{}{}", base, cancel_path),
        }
    }
}
