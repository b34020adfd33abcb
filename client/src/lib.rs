//! # client
//!
//! Leptos + WASM chat front-end for the streamchat relay. Maintains the
//! message transcript, submits it to `/api/chat`, and appends streamed
//! fragments to the last transcript entry as they arrive.
//!
//! The transcript controller in `state::chat` is plain Rust and tested
//! natively; browser networking lives behind the `csr` feature.

pub mod app;
pub mod components;
pub mod net;
pub mod state;

/// WASM entry point invoked when the module loads.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
