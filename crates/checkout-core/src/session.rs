//! # Session Types
//!
//! What the broker asks a provider for, what the provider hands back,
//! and the JSON bodies returned to the browser.

use crate::line_item::LineItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything a provider needs to open a hosted checkout session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionParams {
    /// Accepted payment methods (e.g. `["card"]`)
    pub payment_method_types: Vec<String>,

    /// Priced entries, at least one
    pub line_items: Vec<LineItem>,

    /// Redirect after payment; may contain the provider's session placeholder
    pub success_url: String,

    /// Redirect when the shopper backs out
    pub cancel_url: String,

    /// Prefill for the hosted page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Opaque key/value pairs attached to the session
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    /// Deduplicates retried requests at the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// A checkout session created by a payment provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSession {
    /// Provider's session ID
    pub id: String,

    /// Hosted page to redirect the shopper to
    #[serde(default)]
    pub url: Option<String>,

    /// When the provider will expire the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ProviderSession {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: Some(url.into()),
            expires_at: None,
        }
    }
}

/// Success body: `{ "id": "...", "url": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub url: Option<String>,
}

impl From<ProviderSession> for SessionResponse {
    fn from(session: ProviderSession) -> Self {
        Self {
            id: session.id,
            url: session.url,
        }
    }
}

/// Failure body: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Either body as seen by the browser. Every field is optional so that a
/// 200 without `url` still parses and can be reported as a failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionReply {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SessionReply {
    /// Redirect URL, if present and not blank
    pub fn redirect_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Error message, if present and not blank
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|msg| !msg.trim().is_empty())
    }
}
