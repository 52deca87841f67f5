//! # Stripe Checkout Sessions
//!
//! `SessionProvider` backed by the Stripe Checkout Sessions API.
//! Sessions are always created in `payment` mode (single charge).

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, ProviderSession, SessionParams, SessionProvider};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";
const MODE: &str = "payment";

/// Stripe Checkout Session provider
///
/// Uses Stripe's hosted checkout page; card data never touches our server.
pub struct StripeCheckoutProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutProvider {
    /// Create a new provider. The HTTP client is built once and reused.
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }
}

/// Flatten session params into Stripe's bracketed form encoding
pub fn form_params(params: &SessionParams) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = vec![
        ("mode".to_string(), MODE.to_string()),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
    ];

    for (i, method) in params.payment_method_types.iter().enumerate() {
        form.push((format!("payment_method_types[{}]", i), method.clone()));
    }

    for (i, item) in params.line_items.iter().enumerate() {
        form.push((
            format!("line_items[{}][price_data][currency]", i),
            item.currency.clone(),
        ));
        form.push((
            format!("line_items[{}][price_data][unit_amount]", i),
            item.unit_amount.to_string(),
        ));
        form.push((
            format!("line_items[{}][price_data][product_data][name]", i),
            item.name.clone(),
        ));
        if let Some(ref desc) = item.description {
            form.push((
                format!("line_items[{}][price_data][product_data][description]", i),
                desc.clone(),
            ));
        }
        form.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
    }

    if let Some(ref email) = params.customer_email {
        form.push(("customer_email".to_string(), email.clone()));
    }

    for (key, value) in &params.metadata {
        form.push((format!("metadata[{}]", key), value.clone()));
    }

    form
}

#[async_trait]
impl SessionProvider for StripeCheckoutProvider {
    #[instrument(skip(self, params), fields(line_items = params.line_items.len()))]
    async fn create_session(&self, params: &SessionParams) -> CheckoutResult<ProviderSession> {
        let form = form_params(params);
        debug!("Creating Stripe checkout session: {} form fields", form.len());

        let mut request = self
            .client
            .post(self.config.sessions_url())
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form);

        if let Some(ref key) = params.idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            let message = match serde_json::from_str::<StripeErrorResponse>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => format!("HTTP {}: {}", status, body),
            };

            return Err(CheckoutError::ProviderError {
                provider: PROVIDER.to_string(),
                message,
            });
        }

        let session: StripeCheckoutSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={:?}",
            session.id, session.url
        );

        Ok(ProviderSession {
            id: session.id,
            url: session.url,
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default)]
    message: String,
}
