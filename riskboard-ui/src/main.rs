//! Riskboard Dashboard
//!
//! City health-risk dashboard built with Leptos (WASM).
//!
//! # Panels
//!
//! - Heatmap of every city, colored by risk tier
//! - Trend chart for the selected city
//! - Summary statistics
//! - High-risk alert banner
//! - Risk prediction form
//!
//! # Architecture
//!
//! Client-side rendered Leptos app compiled to WebAssembly. Panel state and
//! rendering rules live in the `riskboard` crate; this crate supplies the
//! `fetch` based client, the canvas chart surface and the DOM.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
