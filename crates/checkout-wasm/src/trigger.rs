//! # Checkout Trigger
//!
//! Client-side flow behind the "Pay Now" button: guard the cart, go busy,
//! post the cart once, then either leave the page or report the failure.
//!
//! ```text
//!  idle ──activate──► busy ──200 + url──► navigating (terminal)
//!   ▲                  │
//!   └──── failure ─────┘  (alert, busy cleared, user may retry)
//! ```
//!
//! The trigger never retries on its own.

use async_trait::async_trait;
use checkout_core::{CartItem, CheckoutRequest, SessionReply};
use std::cell::Cell;
use thiserror::Error;

pub const DEFAULT_LABEL: &str = "Pay Now";
pub const BUSY_LABEL: &str = "Redirecting...";

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";
pub const MISSING_URL_MESSAGE: &str = "Something went wrong: No checkout URL found.";
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An error occurred while starting checkout. See console for details.";

/// What came back from the broker, before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Sends the checkout request to the session broker
#[async_trait(?Send)]
pub trait CheckoutTransport {
    async fn post_checkout(&self, request: &CheckoutRequest) -> Result<RawResponse, TransportError>;
}

/// The page the trigger lives on
pub trait CheckoutSurface {
    /// Show a blocking message to the shopper
    fn alert(&self, message: &str);

    /// Leave the page for `url`
    fn navigate(&self, url: &str);

    /// Developer-facing diagnostics
    fn log_error(&self, context: &str, detail: &str);

    /// Reflect the busy state on the control
    fn set_busy(&self, busy: bool, label: &str);
}

/// Result of one activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Nothing to buy; the server was not contacted
    EmptyCart,
    /// A previous activation is still in flight; ignored
    AlreadyBusy,
    /// Browser sent to the hosted checkout page
    Redirected(String),
    /// Attempt failed; carries the message shown to the shopper
    Failed(String),
}

impl TriggerOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerOutcome::EmptyCart => "empty_cart",
            TriggerOutcome::AlreadyBusy => "already_busy",
            TriggerOutcome::Redirected(_) => "redirected",
            TriggerOutcome::Failed(_) => "failed",
        }
    }
}

/// Checkout button state machine
pub struct CheckoutTrigger<T, S> {
    items: Vec<CartItem>,
    email: Option<String>,
    label: String,
    transport: T,
    surface: S,
    busy: Cell<bool>,
}

impl<T, S> CheckoutTrigger<T, S>
where
    T: CheckoutTransport,
    S: CheckoutSurface,
{
    pub fn new(items: Vec<CartItem>, email: Option<String>, transport: T, surface: S) -> Self {
        Self {
            items,
            email,
            label: DEFAULT_LABEL.to_string(),
            transport,
            surface,
            busy: Cell::new(false),
        }
    }

    /// Builder: set the idle label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Label to render right now
    pub fn label(&self) -> &str {
        if self.is_busy() {
            BUSY_LABEL
        } else {
            &self.label
        }
    }

    /// Push the current busy state and label to the surface
    pub fn render(&self) {
        self.surface.set_busy(self.is_busy(), self.label());
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Body sent to the broker: quantity and currency defaults filled in
    pub fn request_body(&self) -> CheckoutRequest {
        let items = self.items.iter().map(CartItem::with_defaults).collect();
        let mut request = CheckoutRequest::new(items);
        request.customer_email = self.email.clone().filter(|e| !e.trim().is_empty());
        request
    }

    /// Run one checkout attempt.
    ///
    /// The busy flag is set before the first await, so an activation that
    /// arrives while one is in flight returns `AlreadyBusy` without a request.
    pub async fn activate(&self) -> TriggerOutcome {
        if self.is_busy() {
            return TriggerOutcome::AlreadyBusy;
        }

        if self.items.is_empty() {
            self.surface.alert(EMPTY_CART_MESSAGE);
            return TriggerOutcome::EmptyCart;
        }

        self.set_busy(true);
        let outcome = self.submit().await;

        // The page is unloading after a redirect; leave the control disabled.
        if !matches!(outcome, TriggerOutcome::Redirected(_)) {
            self.set_busy(false);
        }

        outcome
    }

    async fn submit(&self) -> TriggerOutcome {
        let request = self.request_body();

        let response = match self.transport.post_checkout(&request).await {
            Ok(response) => response,
            Err(e) => return self.unexpected(&e.to_string()),
        };

        let reply: SessionReply = match serde_json::from_str(&response.body) {
            Ok(reply) => reply,
            Err(e) => return self.unexpected(&format!("unreadable response body: {}", e)),
        };

        if !response.is_success() {
            self.surface.log_error("create-session error", &response.body);

            let reason = match reply.error_message() {
                Some(message) => message.to_string(),
                None if !response.status_text.is_empty() => response.status_text.clone(),
                None => format!("HTTP {}", response.status),
            };
            return self.fail(format!("Failed to create checkout session: {}", reason));
        }

        match reply.redirect_url() {
            Some(url) => {
                self.surface.navigate(url);
                TriggerOutcome::Redirected(url.to_string())
            }
            None => self.fail(MISSING_URL_MESSAGE.to_string()),
        }
    }

    fn unexpected(&self, detail: &str) -> TriggerOutcome {
        self.surface.log_error("handleCheckout error", detail);
        self.fail(UNEXPECTED_ERROR_MESSAGE.to_string())
    }

    fn fail(&self, message: String) -> TriggerOutcome {
        self.surface.alert(&message);
        TriggerOutcome::Failed(message)
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        self.surface.set_busy(busy, self.label());
    }
}
