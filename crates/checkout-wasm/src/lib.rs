//! # checkout-wasm
//!
//! Browser checkout trigger for cart-checkout-rs.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CheckoutButton } from 'checkout-wasm';
//!
//! await init();
//!
//! const button = document.getElementById('pay');
//! const checkout = new CheckoutButton(
//!   [{ name: 'Book', price: 499, quantity: 2 }],
//!   'reader@example.in',
//!   'Pay Now',
//!   button,
//! );
//!
//! button.addEventListener('click', () => checkout.checkout());
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod browser;
pub mod transport;
pub mod trigger;

pub use browser::BrowserSurface;
pub use transport::{HttpTransport, CHECKOUT_ENDPOINT_PATH};
pub use trigger::{
    CheckoutSurface, CheckoutTransport, CheckoutTrigger, RawResponse, TransportError,
    TriggerOutcome,
};

use checkout_core::CartItem;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlButtonElement;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// JS handle for one checkout button
#[wasm_bindgen]
pub struct CheckoutButton {
    trigger: Rc<CheckoutTrigger<HttpTransport, BrowserSurface>>,
}

#[wasm_bindgen]
impl CheckoutButton {
    /// `items` is an array of `{ name, price, quantity?, currency?, description? }`
    #[wasm_bindgen(constructor)]
    pub fn new(
        items: JsValue,
        email: Option<String>,
        label: Option<String>,
        button: Option<HtmlButtonElement>,
    ) -> Result<CheckoutButton, JsValue> {
        let items: Vec<CartItem> = serde_wasm_bindgen::from_value(items)
            .map_err(|e| JsValue::from_str(&format!("Invalid cart items: {}", e)))?;

        let origin = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window available"))?
            .location()
            .origin()?;
        let transport =
            HttpTransport::for_origin(&origin).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut trigger = CheckoutTrigger::new(items, email, transport, BrowserSurface::new(button));
        if let Some(label) = label {
            trigger = trigger.with_label(label);
        }
        trigger.render();

        Ok(Self {
            trigger: Rc::new(trigger),
        })
    }

    /// Start checkout. Resolves to the outcome name
    /// (`redirected`, `failed`, `empty_cart`, `already_busy`).
    pub fn checkout(&self) -> js_sys::Promise {
        let trigger = Rc::clone(&self.trigger);
        future_to_promise(async move {
            let outcome = trigger.activate().await;
            Ok(JsValue::from_str(outcome.as_str()))
        })
    }

    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.trigger.is_busy()
    }

    #[wasm_bindgen(getter)]
    pub fn label(&self) -> String {
        self.trigger.label().to_string()
    }
}

/// Amount the server will charge per unit, in the minor unit
#[wasm_bindgen]
pub fn minor_units(price: f64) -> Result<i64, JsValue> {
    checkout_core::to_minor_units("item", price).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
