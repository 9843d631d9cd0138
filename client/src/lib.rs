//! # client
//!
//! Leptos + WASM frontend for the jobdesk marketplace admin.
//!
//! This crate contains the route table and guard, the role-filtered side
//! menu, session and idle handling, the KYC wizard with its browser
//! persistence, the REST client for `/api/v1` and the pages built on them.
//! The `hydrate` feature builds the browser bundle; `ssr` is used by the
//! host server to render the same components.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod nav;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server render.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
