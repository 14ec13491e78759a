//! # client
//!
//! Leptos + WASM frontend for the model testbench.
//!
//! Pages cover load and regression test runs, chunk review with analyst
//! verdicts, ad-hoc model predictions, image hosting, and collector task
//! submission. Every screen talks to the backend's `/utilities` REST surface
//! through [`net::api`]; wire shapes live in the shared `records` crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
