//! # HTTP Transport
//!
//! `reqwest`-backed transport. On `wasm32` reqwest drives the browser's
//! `fetch`, so the same code serves the page and native tests.

use crate::trigger::{CheckoutTransport, RawResponse, TransportError};
use async_trait::async_trait;
use checkout_core::CheckoutRequest;
use reqwest::Client;

/// Path of the session broker endpoint
pub const CHECKOUT_ENDPOINT_PATH: &str = "/api/stripe/create-session";

/// Posts checkout requests as JSON to the session broker
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// `endpoint` must be absolute (reqwest does not resolve relative URLs)
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let endpoint: String = endpoint.into();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(TransportError::InvalidEndpoint(endpoint));
        }

        Ok(Self {
            client: Client::new(),
            endpoint,
        })
    }

    /// Transport for the broker served from `origin` (e.g. `window.location.origin`)
    pub fn for_origin(origin: &str) -> Result<Self, TransportError> {
        Self::new(format!(
            "{}{}",
            origin.trim_end_matches('/'),
            CHECKOUT_ENDPOINT_PATH
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl CheckoutTransport for HttpTransport {
    async fn post_checkout(&self, request: &CheckoutRequest) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
