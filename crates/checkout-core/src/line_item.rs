//! # Line Items
//!
//! Provider-facing line items derived 1:1 from cart items.
//!
//! Amounts are always sent in the minor unit: `unit_amount = round(price * 100)`,
//! where `round` is `f64::round` (half away from zero) applied to the
//! floating-point product. `499.995` therefore becomes `50000`, while `1.005`
//! becomes `100` because `1.005 * 100` is `100.49999…` in binary.

use crate::cart::{CartItem, CheckoutRequest};
use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

/// Minor units per major unit. Fixed for every currency.
pub const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// Largest amount that survives the f64 -> i64 conversion exactly (2^53 - 1)
const MAX_MINOR_AMOUNT: f64 = 9_007_199_254_740_991.0;

/// A priced entry submitted to the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Lowercase ISO 4217 code
    pub currency: String,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price in the minor currency unit (paise for inr)
    pub unit_amount: i64,

    /// Quantity, at least 1
    pub quantity: u32,
}

impl LineItem {
    /// Map a cart item, applying defaults and validating price and quantity.
    ///
    /// A zero price is accepted. A zero quantity, a negative price or a
    /// non-finite price is rejected.
    pub fn from_cart_item(item: &CartItem) -> CheckoutResult<Self> {
        let quantity = item.effective_quantity();
        if quantity == 0 {
            return Err(CheckoutError::InvalidQuantity {
                item: item.name.clone(),
            });
        }

        Ok(Self {
            currency: item.effective_currency(),
            name: item.name.clone(),
            description: item.effective_description().map(String::from),
            unit_amount: to_minor_units(&item.name, item.price)?,
            quantity,
        })
    }

    /// Total for this line in the minor unit
    pub fn total(&self) -> i64 {
        self.unit_amount.saturating_mul(i64::from(self.quantity))
    }
}

/// Convert a major-unit price to the provider's minor unit
pub fn to_minor_units(item: &str, price: f64) -> CheckoutResult<i64> {
    if !price.is_finite() {
        return Err(CheckoutError::InvalidPrice {
            item: item.to_string(),
            message: "price must be a finite number".to_string(),
        });
    }
    if price < 0.0 {
        return Err(CheckoutError::InvalidPrice {
            item: item.to_string(),
            message: "price must not be negative".to_string(),
        });
    }

    let minor = (price * MINOR_UNITS_PER_MAJOR).round();
    if minor > MAX_MINOR_AMOUNT {
        return Err(CheckoutError::InvalidPrice {
            item: item.to_string(),
            message: "price is too large".to_string(),
        });
    }

    Ok(minor as i64)
}

/// Map every item in a request. Fails with [`CheckoutError::NoItems`] when
/// the resulting list is empty.
pub fn build_line_items(request: &CheckoutRequest) -> CheckoutResult<Vec<LineItem>> {
    let line_items = request
        .items
        .iter()
        .map(LineItem::from_cart_item)
        .collect::<CheckoutResult<Vec<_>>>()?;

    if line_items.is_empty() {
        return Err(CheckoutError::NoItems);
    }

    Ok(line_items)
}
