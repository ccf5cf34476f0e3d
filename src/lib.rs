//! # portal
//!
//! Leptos + WASM front end for a session-cookie authentication API: a login
//! page and a protected dashboard.
//!
//! The protocol (anti-forgery bootstrap, login, identity query, logout) lives
//! in [`net::api::AuthClient`], generic over a [`net::transport::Transport`]
//! so it runs against `gloo-net` in the browser and `reqwest` natively.

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod route;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
