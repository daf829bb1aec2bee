//! # client
//!
//! Leptos + WASM administrative console for the building-management platform.
//!
//! This crate contains pages, components, the browser bindings of the
//! `session` lifecycle (`localStorage`, `gloo-net`, `js_sys::Date`), and the
//! REST helpers for the external IAM service. The `server` crate renders the
//! shell with the `ssr` feature; the browser bundle is built with `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
