//! # checkout-stripe
//!
//! Stripe Checkout Sessions provider for cart-checkout-rs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripeCheckoutProvider;
//! use checkout_core::SessionProvider;
//!
//! // Create provider from environment (STRIPE_SECRET_KEY)
//! let provider = StripeCheckoutProvider::from_env()?;
//!
//! let session = provider.create_session(&params).await?;
//!
//! // Redirect user to session.url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::{form_params, StripeCheckoutProvider};
pub use config::StripeConfig;
