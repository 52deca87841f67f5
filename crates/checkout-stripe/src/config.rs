//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! The secret key is loaded from the environment.

use checkout_core::CheckoutError;
use std::env;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_API_VERSION: &str = "2024-12-18.acacia";

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `STRIPE_SECRET_KEY`.
    /// Optional: `STRIPE_API_BASE_URL`, `STRIPE_API_VERSION`.
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CheckoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("STRIPE_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| CheckoutError::Configuration("STRIPE_SECRET_KEY not set".to_string()))?;

        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        let mut config = Self::new(secret_key);
        if let Some(url) = lookup("STRIPE_API_BASE_URL").filter(|u| !u.is_empty()) {
            config = config.with_api_base_url(url);
        }
        if let Some(version) = lookup("STRIPE_API_VERSION").filter(|v| !v.is_empty()) {
            config.api_version = version;
        }

        Ok(config)
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Endpoint for creating checkout sessions
    pub fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.api_base_url)
    }
}
