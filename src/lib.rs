//! # softlink
//!
//! Leptos + WASM client for SoftLink, the platform connecting students,
//! companies and coordinators around initiatives and projects.
//!
//! This crate holds the authentication/session core (`state`), the REST
//! transport (`net`), role-aware routing helpers (`util`), and the pages that
//! sit on top of them. Everything outside the `csr` feature builds and tests
//! natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: logging, panic hook, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
