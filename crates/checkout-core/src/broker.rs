//! # Session Broker
//!
//! Turns a cart into a provider checkout session: map, validate, call once,
//! hand back `{ id, url }`. Stateless between calls.

use crate::cart::CheckoutRequest;
use crate::error::CheckoutResult;
use crate::line_item::build_line_items;
use crate::provider::{BoxedSessionProvider, CheckoutUrls};
use crate::session::{SessionParams, SessionResponse};
use crate::settings::CheckoutSettings;
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument};

/// Metadata key carrying the integration tag
pub const INTEGRATION_METADATA_KEY: &str = "integration";

/// Converts checkout requests into provider sessions
#[derive(Clone)]
pub struct SessionBroker {
    provider: BoxedSessionProvider,
    urls: CheckoutUrls,
    settings: CheckoutSettings,
}

impl SessionBroker {
    pub fn new(provider: BoxedSessionProvider, urls: CheckoutUrls, settings: CheckoutSettings) -> Self {
        Self {
            provider,
            urls,
            settings,
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub fn urls(&self) -> &CheckoutUrls {
        &self.urls
    }

    /// Build provider parameters without calling the provider.
    /// Fails with `NoItems` on an empty cart.
    pub fn build_params(&self, request: &CheckoutRequest) -> CheckoutResult<SessionParams> {
        let line_items = build_line_items(request)?;

        let mut metadata = BTreeMap::new();
        if !self.settings.integration_tag.is_empty() {
            metadata.insert(
                INTEGRATION_METADATA_KEY.to_string(),
                self.settings.integration_tag.clone(),
            );
        }

        Ok(SessionParams {
            payment_method_types: self.settings.payment_method_types.clone(),
            line_items,
            success_url: self.urls.success_url(),
            cancel_url: self.urls.cancel_url(),
            customer_email: request.customer_email().map(String::from),
            metadata,
            idempotency_key: request.idempotency_key().map(String::from),
        })
    }

    /// Validate the cart and open a session with the provider
    #[instrument(skip(self, request), fields(items = request.items.len(), provider = self.provider_name()))]
    pub async fn create_session(&self, request: &CheckoutRequest) -> CheckoutResult<SessionResponse> {
        let params = self.build_params(request).map_err(|e| {
            debug!("Rejected checkout request: {}", e);
            e
        })?;

        let total: i64 = params.line_items.iter().map(|item| item.total()).sum();
        debug!(
            "Requesting session: {} line items, total={} minor units, success_url={}",
            params.line_items.len(),
            total,
            params.success_url
        );

        let session = self.provider.create_session(&params).await.map_err(|e| {
            error!("create-session error: {}", e);
            e
        })?;

        match session.expires_at {
            Some(expires_at) => info!(
                "Created checkout session: {} (expires {})",
                session.id,
                expires_at.to_rfc3339()
            ),
            None => info!("Created checkout session: {}", session.id),
        }

        Ok(session.into())
    }
}
