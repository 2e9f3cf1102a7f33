//! Shared utilities for API access, configuration, errors, logging, and build
//! metadata.
//!
//! Centralizing these helpers keeps network behavior consistent between the
//! browser transport (`gloo-net`) and the native one (`reqwest`) used by the
//! test suite. Configuration values are public; nothing here handles secrets,
//! but callers must still avoid logging user passwords.

pub mod api;
pub mod build_info;
pub mod config;
pub mod errors;
pub mod telemetry;

pub use api::ApiClient;
pub use config::AppConfig;
pub use errors::AppError;
