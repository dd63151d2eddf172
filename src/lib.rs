//! # storefront
//!
//! Leptos + WASM interaction widgets for a product storefront theme:
//! animated `<details>` disclosures, header menus with a full-viewport mega
//! menu variant, a validated group-order file upload, and a product form that
//! refuses to submit without a ribbon selection.
//!
//! The `state` layer holds every invariant and builds natively; the
//! `components` layer binds it to the DOM under the `hydrate` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod state;
pub mod util;

/// WASM entry: install logging and the panic hook, then hydrate the markup
/// produced by `app::render_page` in an `ssr` build.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();

    let config = config::StorefrontConfig::load();
    let level = match config.level() {
        Ok(level) => level,
        Err(err) => {
            web_sys::console::warn_1(&err.to_string().into());
            log::Level::Warn
        }
    };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }

    leptos::mount::hydrate_body(app::App);
}
