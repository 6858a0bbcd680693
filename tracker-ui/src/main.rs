//! DSA Tracker Dashboard
//!
//! Problem-tracking dashboard built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered. All behavior lives in the `dsa-tracker` core; this
//! crate supplies browser storage, fetch and timers, and paints the core's
//! snapshots.

use leptos::*;

mod app;
mod components;
mod platform;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
