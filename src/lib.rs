//! Browser console for a REST "users" collection.
//!
//! The page lists every user returned by `GET {base}`, and offers a form that
//! creates (`POST {base}`) or updates (`PUT {base}/{id}`) a record, plus a
//! per-row delete (`DELETE {base}/{id}`). Every mutation is followed by a full
//! reload of the list so the table always mirrors the backend.
//!
//! Everything except the Leptos views is target independent: the state
//! machine, the controller and the HTTP helpers compile natively as well, which
//! is how the test suite drives them.

#[path = "lib/mod.rs"]
pub mod app_lib;
pub mod features;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod routes;

pub use app_lib::{AppConfig, AppError};
pub use features::users::{
    FormMode, ListView, StateStore, User, UserDraft, UserId, UsersApi, UsersClient,
    UsersController, UsersState,
};

/// Installs browser console logging and mounts the users page into `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    use crate::app::App;
    use leptos::prelude::*;

    let config = AppConfig::load();

    if let Err(err) = app_lib::telemetry::init(config.log_level) {
        web_sys::console::error_1(&format!("Failed to initialize logging: {err}").into());
    }

    tracing::info!(api_base_url = %config.api_base_url, "users console starting");

    mount_to_body(move || view! { <App config=config /> });
}
