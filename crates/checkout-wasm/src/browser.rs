//! # Browser Surface
//!
//! `CheckoutSurface` over `web-sys`: `alert()`, `location.href`, the console,
//! and an optional `<button>` that mirrors the busy state.

use crate::trigger::CheckoutSurface;
use wasm_bindgen::JsValue;
use web_sys::HtmlButtonElement;

pub struct BrowserSurface {
    button: Option<HtmlButtonElement>,
}

impl BrowserSurface {
    pub fn new(button: Option<HtmlButtonElement>) -> Self {
        Self { button }
    }
}

impl CheckoutSurface for BrowserSurface {
    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(message) {
                web_sys::console::error_2(&JsValue::from_str("alert failed:"), &e);
            }
        }
    }

    fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                web_sys::console::error_2(&JsValue::from_str("navigation failed:"), &e);
            }
        }
    }

    fn log_error(&self, context: &str, detail: &str) {
        web_sys::console::error_2(
            &JsValue::from_str(&format!("{}:", context)),
            &JsValue::from_str(detail),
        );
    }

    fn set_busy(&self, busy: bool, label: &str) {
        let Some(button) = &self.button else {
            return;
        };
        button.set_disabled(busy);
        if let Err(e) = button.set_attribute("aria-busy", if busy { "true" } else { "false" }) {
            web_sys::console::error_2(&JsValue::from_str("aria-busy update failed:"), &e);
        }
        button.set_text_content(Some(label));
    }
}
