//! WASM entry point of the storefront page.
//!
//! Reads the backend override the server injected into the page, then
//! hydrates the server-rendered document. Hydration completing is the
//! page-ready point at which the product list starts loading.

use app::config::{BACKEND_URL_VAR, BackendConfig};
use leptos::prelude::provide_context;
use wasm_bindgen::JsValue;

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates the page on the client.
///
/// Logging and the panic hook are installed first so that failures during
/// hydration reach the browser console.
pub fn hydrate() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let backend = BackendConfig::from_override(backend_override().as_deref());
    log::debug!("Using products backend {}", backend.base_url());

    leptos::mount::hydrate_body(move || {
        provide_context(backend);
        app::component()
    });
}

/// Value of `window.BACKEND_URL`, if it is set to a string.
fn backend_override() -> Option<String> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(BACKEND_URL_VAR))
        .ok()?
        .as_string()
}

