//! Client-side configuration exposed to the browser.

use serde::Serialize;

/// Non-secret values a browser needs to initialize the payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub publishable_key: String,
}

impl PublicConfig {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
        }
    }
}
