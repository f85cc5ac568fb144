//! Hospital Reception Chat Widget
//!
//! Leptos-based WASM frontend binding `reception-core` to the page.

mod api;
mod app;
mod components;
mod pages;
mod ui;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
