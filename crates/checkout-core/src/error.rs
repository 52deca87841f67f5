//! # Checkout Error Types
//!
//! Typed error handling for the cart-checkout flow.
//! All broker and provider operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Message returned to the client when a cart has no items
pub const NO_ITEMS_MESSAGE: &str = "No items provided";

/// Message returned when a server-side failure carries no usable detail
pub const GENERIC_SERVER_MESSAGE: &str = "Server error";

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Cart was empty after mapping
    #[error("No items provided")]
    NoItems,

    /// Request body could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Negative, non-finite or out-of-range price
    #[error("Invalid price for '{item}': {message}")]
    InvalidPrice { item: String, message: String },

    /// Quantity below one
    #[error("Invalid quantity for '{item}': must be at least 1")]
    InvalidQuantity { item: String },

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Payment provider rejected the request
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::NoItems
            | CheckoutError::InvalidRequest(_)
            | CheckoutError::InvalidPrice { .. }
            | CheckoutError::InvalidQuantity { .. } => 400,
            CheckoutError::Configuration(_)
            | CheckoutError::ProviderError { .. }
            | CheckoutError::NetworkError(_)
            | CheckoutError::Serialization(_)
            | CheckoutError::Internal(_) => 500,
        }
    }

    /// Returns true if the caller can fix this by changing the cart
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// The message placed in the `error` field of the response body.
    ///
    /// Provider and network failures expose the underlying message as-is,
    /// falling back to [`GENERIC_SERVER_MESSAGE`] when it is blank.
    pub fn public_message(&self) -> String {
        let message = match self {
            CheckoutError::NoItems => return NO_ITEMS_MESSAGE.to_string(),
            CheckoutError::ProviderError { message, .. }
            | CheckoutError::NetworkError(message)
            | CheckoutError::Serialization(message)
            | CheckoutError::Configuration(message)
            | CheckoutError::Internal(message) => message.clone(),
            other => other.to_string(),
        };

        if message.trim().is_empty() {
            GENERIC_SERVER_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(CheckoutError::NoItems.status_code(), 400);
        assert_eq!(
            CheckoutError::InvalidQuantity { item: "Book".into() }.status_code(),
            400
        );
        assert_eq!(
            CheckoutError::ProviderError {
                provider: "stripe".into(),
                message: "Invalid API Key provided".into()
            }
            .status_code(),
            500
        );
        assert_eq!(CheckoutError::NetworkError("timeout".into()).status_code(), 500);
    }

    #[test]
    fn test_public_message() {
        assert_eq!(CheckoutError::NoItems.public_message(), "No items provided");

        let err = CheckoutError::ProviderError {
            provider: "stripe".into(),
            message: "Invalid API Key provided".into(),
        };
        assert_eq!(err.public_message(), "Invalid API Key provided");

        let blank = CheckoutError::ProviderError {
            provider: "stripe".into(),
            message: "  ".into(),
        };
        assert_eq!(blank.public_message(), "Server error");

        let qty = CheckoutError::InvalidQuantity { item: "Book".into() };
        assert_eq!(qty.public_message(), "Invalid quantity for 'Book': must be at least 1");
    }

    #[test]
    fn test_client_errors() {
        assert!(CheckoutError::NoItems.is_client_error());
        assert!(!CheckoutError::Internal("x".into()).is_client_error());
    }
}
