//! # Cart Types
//!
//! The client-owned cart and the request body that carries it to the broker.
//! Prices are in the major currency unit (rupees for `inr`).

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Deserializer, Serialize};

/// Currency used when an item does not name one
pub const DEFAULT_CURRENCY: &str = "inr";

/// Quantity used when an item does not name one
pub const DEFAULT_QUANTITY: u32 = 1;

/// A single entry in the shopper's cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product name shown on the hosted checkout page
    pub name: String,

    /// Unit price in the major currency unit
    pub price: f64,

    /// Quantity (defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// ISO 4217 code, lowercase (defaults to "inr")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Optional product description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CartItem {
    /// Create an item with only the required fields
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: None,
            currency: None,
            description: None,
        }
    }

    /// Builder: set quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Builder: set currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Quantity with the default applied
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(DEFAULT_QUANTITY)
    }

    /// Lowercased currency code with the default applied
    pub fn effective_currency(&self) -> String {
        match self.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_ascii_lowercase(),
            _ => DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Description, if present and not blank
    pub fn effective_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|desc| !desc.trim().is_empty())
    }

    /// Copy of this item with quantity and currency filled in,
    /// the shape the browser sends over the wire
    pub fn with_defaults(&self) -> Self {
        Self {
            name: self.name.clone(),
            price: self.price,
            quantity: Some(self.effective_quantity()),
            currency: Some(self.effective_currency()),
            description: self.description.clone(),
        }
    }
}

/// Body of `POST /api/stripe/create-session`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Items to purchase (`null` or missing is treated as empty)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<CartItem>,

    /// Customer email used to prefill the hosted page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    /// Forwarded to the provider as its idempotency key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CartItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CartItem>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CheckoutRequest {
    /// Create a request for the given items
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            items,
            customer_email: None,
            idempotency_key: None,
        }
    }

    /// Parse a raw JSON body
    pub fn from_json(body: &[u8]) -> CheckoutResult<Self> {
        serde_json::from_slice(body).map_err(|e| CheckoutError::InvalidRequest(e.to_string()))
    }

    /// Builder: set customer email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    /// Builder: set idempotency key
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Customer email, if present and not blank
    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Idempotency key, if present and not blank
    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Check if the cart is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_defaults() {
        let item = CartItem::new("Book", 499.0);

        assert_eq!(item.effective_quantity(), 1);
        assert_eq!(item.effective_currency(), "inr");
        assert_eq!(item.effective_description(), None);
    }

    #[test]
    fn test_currency_is_lowercased() {
        let item = CartItem::new("Mug", 10.0).with_currency("USD");
        assert_eq!(item.effective_currency(), "usd");

        let blank = CartItem::new("Mug", 10.0).with_currency("");
        assert_eq!(blank.effective_currency(), "inr");
    }

    #[test]
    fn test_with_defaults_fills_wire_fields() {
        let item = CartItem::new("Pen", 20.0).with_description("Blue ink");
        let wire = serde_json::to_value(item.with_defaults()).unwrap();

        assert_eq!(
            wire,
            serde_json::json!({
                "name": "Pen",
                "price": 20.0,
                "quantity": 1,
                "currency": "inr",
                "description": "Blue ink"
            })
        );
    }

    #[test]
    fn test_request_parsing() {
        let body = br#"{"items":[{"name":"Book","price":499,"quantity":2}],"customerEmail":"a@b.in"}"#;
        let request = CheckoutRequest::from_json(body).unwrap();

        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, Some(2));
        assert_eq!(request.customer_email(), Some("a@b.in"));
    }

    #[test]
    fn test_missing_or_null_items_is_empty() {
        assert!(CheckoutRequest::from_json(b"{}").unwrap().is_empty());
        assert!(CheckoutRequest::from_json(br#"{"items":null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_request_is_rejected() {
        let err = CheckoutRequest::from_json(br#"{"items":[{"name":"Book"}]}"#).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidRequest(_)));

        let err = CheckoutRequest::from_json(b"not json").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_blank_email_is_ignored() {
        let request = CheckoutRequest::new(vec![CartItem::new("Book", 1.0)]).with_email("  ");
        assert_eq!(request.customer_email(), None);
    }
}
