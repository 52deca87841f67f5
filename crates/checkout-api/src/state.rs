//! # Application State
//!
//! Shared state for the Axum application.
//! The payment provider is constructed once here and injected into the broker.

use anyhow::Context;
use checkout_core::{BoxedSessionProvider, CheckoutSettings, CheckoutUrls, SessionBroker};
use checkout_stripe::StripeCheckoutProvider;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public storefront URL used for redirect targets
    pub site_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit checkout settings file, if any
    pub settings_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    ///
    /// `SITE_URL` is required; `NEXT_PUBLIC_SITE_URL` is accepted as a fallback.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_url = lookup("SITE_URL")
            .or_else(|| lookup("NEXT_PUBLIC_SITE_URL"))
            .filter(|url| !url.trim().is_empty())
            .context("SITE_URL (or NEXT_PUBLIC_SITE_URL) not set")?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", port))?,
            None => 8080,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            site_url,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            settings_path: lookup("CHECKOUT_SETTINGS").map(PathBuf::from),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cart-to-session translation
    pub broker: Arc<SessionBroker>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let settings = load_checkout_settings(config.settings_path.as_deref())?;

        let stripe = StripeCheckoutProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        if stripe.config().is_test_mode() {
            tracing::info!("Stripe running in test mode");
        } else {
            tracing::warn!("Stripe running in live mode: real cards will be charged");
        }

        Ok(Self::with_provider(config, settings, Arc::new(stripe)))
    }

    /// Build state around an already constructed provider
    pub fn with_provider(
        config: AppConfig,
        settings: CheckoutSettings,
        provider: BoxedSessionProvider,
    ) -> Self {
        let urls = CheckoutUrls::from_settings(&config.site_url, &settings);
        let broker = SessionBroker::new(provider, urls, settings);

        Self {
            broker: Arc::new(broker),
            config,
        }
    }
}

/// Load checkout settings from an explicit path or the default locations
fn load_checkout_settings(explicit: Option<&std::path::Path>) -> anyhow::Result<CheckoutSettings> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return CheckoutSettings::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()));
    }

    let config_paths = [
        "config/checkout.toml",
        "../config/checkout.toml",
        "../../config/checkout.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings = CheckoutSettings::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded checkout settings from {}", path);
            return Ok(settings);
        }
    }

    tracing::warn!("No checkout settings found, using defaults");
    Ok(CheckoutSettings::default())
}
