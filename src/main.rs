//! SIVEM Dashboard
//!
//! Incident-risk forecasting dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Historical forecasts per province and year
//! - Scenario analysis with a configurable input vector
//! - Risk classification badge and expected-count charts
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All prediction logic lives in the external SIVEM API, which
//! this client reaches as JSON over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
