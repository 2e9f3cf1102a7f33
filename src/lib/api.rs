//! HTTP helpers for the JSON users API with consistent timeouts and error
//! handling. The browser build talks through `gloo-net` with an
//! `AbortController` timeout; native builds (and the test suite) use `reqwest`.
//! Both transports expose the same `ApiClient` surface and share URL building
//! and error-body sanitizing, so status handling cannot drift between them.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod native;

#[cfg(target_arch = "wasm32")]
pub use browser::ApiClient;
#[cfg(not(target_arch = "wasm32"))]
pub use native::ApiClient;

use super::errors::AppError;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Builds a URL from a base URL and a path relative to it. An empty path
/// addresses the base itself, which is the users collection.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');

    if path.is_empty() {
        base.to_string()
    } else if base.is_empty() {
        format!("/{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Builds the `AppError` returned for a non-success status.
pub(crate) fn http_error(status: u16, body: &str) -> AppError {
    AppError::Http {
        status,
        message: sanitize_body(body),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

fn encode_body<B: serde::Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}
