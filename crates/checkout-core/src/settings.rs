//! # Checkout Settings
//!
//! Fixed parameters of every session, loadable from `config/checkout.toml`.
//!
//! ```toml
//! success_path = "/order/success"
//! cancel_path = "/cart"
//! integration_tag = "college-project"
//! payment_method_types = ["card"]
//! ```

use serde::{Deserialize, Serialize};

/// Static settings applied to every checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    /// Path the provider redirects to after payment
    pub success_path: String,

    /// Path the provider redirects to on cancel
    pub cancel_path: String,

    /// Value of the `integration` metadata entry. Empty disables it.
    pub integration_tag: String,

    /// Payment methods offered on the hosted page
    pub payment_method_types: Vec<String>,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            success_path: "/order/success".to_string(),
            cancel_path: "/cart".to_string(),
            integration_tag: "college-project".to_string(),
            payment_method_types: vec!["card".to_string()],
        }
    }
}

impl CheckoutSettings {
    /// Load settings from a TOML string; missing keys keep their defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
