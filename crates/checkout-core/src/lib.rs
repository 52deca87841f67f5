//! # checkout-core
//!
//! Core types and the session broker for cart-checkout-rs.
//!
//! This crate provides:
//! - `CartItem` and `CheckoutRequest`, the body the browser sends
//! - `LineItem` and minor-unit conversion (`round(price * 100)`)
//! - `SessionProvider` trait for payment providers
//! - `SessionBroker`, the cart-to-session translation step
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CartItem, CheckoutRequest, CheckoutSettings, CheckoutUrls, SessionBroker};
//!
//! let broker = SessionBroker::new(provider, CheckoutUrls::new(site_url), CheckoutSettings::default());
//!
//! let request = CheckoutRequest::new(vec![CartItem::new("Book", 499.0).with_quantity(2)]);
//! let session = broker.create_session(&request).await?;
//!
//! // Redirect the shopper to session.url
//! ```

pub mod broker;
pub mod cart;
pub mod error;
pub mod line_item;
pub mod provider;
pub mod session;
pub mod settings;

// Re-exports for convenience
pub use broker::SessionBroker;
pub use cart::{CartItem, CheckoutRequest, DEFAULT_CURRENCY, DEFAULT_QUANTITY};
pub use error::{CheckoutError, CheckoutResult, GENERIC_SERVER_MESSAGE, NO_ITEMS_MESSAGE};
pub use line_item::{build_line_items, to_minor_units, LineItem};
pub use provider::{BoxedSessionProvider, CheckoutUrls, SessionProvider, SESSION_ID_PLACEHOLDER};
pub use session::{ErrorBody, ProviderSession, SessionParams, SessionReply, SessionResponse};
pub use settings::CheckoutSettings;
