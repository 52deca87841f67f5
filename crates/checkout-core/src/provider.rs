//! # Session Provider Trait
//!
//! Seam between the broker and the payment provider that hosts checkout.
//!
//! ```text
//! ┌───────────────┐   SessionParams    ┌────────────────────────┐
//! │ SessionBroker │ ─────────────────► │ SessionProvider (trait)│
//! └───────────────┘ ◄───────────────── │  └── create_session()  │
//!                    ProviderSession   └────────────────────────┘
//!                                                  ▲
//!                                      ┌───────────┴───────────┐
//!                                      │ StripeCheckoutProvider│
//!                                      └───────────────────────┘
//! ```

use crate::error::CheckoutResult;
use crate::session::{ProviderSession, SessionParams};
use crate::settings::CheckoutSettings;
use async_trait::async_trait;
use std::sync::Arc;

/// Placeholder Stripe substitutes with the real session id on redirect
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// A payment provider able to open hosted checkout sessions.
///
/// Implementations are built once at startup and shared across requests.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Create a checkout session.
    ///
    /// Exactly one outbound call per invocation; no retries.
    async fn create_session(&self, params: &SessionParams) -> CheckoutResult<ProviderSession>;

    /// Provider name (for logging and error attribution)
    fn provider_name(&self) -> &'static str;
}

/// Shared, dynamically dispatched provider
pub type BoxedSessionProvider = Arc<dyn SessionProvider>;

/// Redirect targets built from the public site URL
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Base URL of the storefront (e.g., "https://shop.example.in")
    pub base_url: String,
    /// Success page path
    pub success_path: String,
    /// Cancel page path
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_settings(base_url, &CheckoutSettings::default())
    }

    /// Use the paths configured in `settings`
    pub fn from_settings(base_url: impl Into<String>, settings: &CheckoutSettings) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            success_path: settings.success_path.clone(),
            cancel_path: settings.cancel_path.clone(),
        }
    }

    /// Success URL with the session id placeholder appended
    pub fn success_url(&self) -> String {
        let url = format!("{}{}", self.base_url, self.success_path);
        if url.contains('?') {
            format!("{}&session_id={}", url, SESSION_ID_PLACEHOLDER)
        } else {
            format!("{}?session_id={}", url, SESSION_ID_PLACEHOLDER)
        }
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}
