//! # session-bridge
//!
//! Leptos + WASM session controller that bridges a remote identity provider
//! to a cookie-held browser session and to the visible login/logout UI.
//!
//! The crate is organized leaf-first: `util::cookie` owns the `token` cookie,
//! `net` talks to the identity provider, `state` derives and renders UI state,
//! and `controller` runs the register / sign-in / sign-out state machine.
//! `pages` and `app` bind that machine to Leptos views.

pub mod app;
pub mod config;
pub mod controller;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point: install logging and mount the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logging not installed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
