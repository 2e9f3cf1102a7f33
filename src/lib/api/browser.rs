use super::{AppError, build_url_with_base, encode_body, http_error};
use crate::app_lib::config::AppConfig;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::{Serialize, de::DeserializeOwned};
use web_sys::{AbortController, AbortSignal};

/// JSON client bound to one API base URL, backed by the browser `fetch`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
}

impl ApiClient {
    /// Builds a client with the configured base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Never fails in the browser; the signature matches the native client.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            base_url: config.api_base_url.clone(),
            timeout_ms: config.request_timeout_ms,
        })
    }

    /// Fetches and decodes JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let response = self
            .send_with_timeout(|signal| {
                Request::get(&url)
                    .abort_signal(Some(signal))
                    .build()
                    .map_err(build_error)
            })
            .await?;

        handle_json_response(response).await
    }

    /// Posts JSON and ignores the response body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let payload = encode_body(body)?;
        let response = self
            .send_with_timeout(move |signal| with_json_body(Request::post(&url), signal, payload))
            .await?;

        handle_empty_response(response).await
    }

    /// Puts JSON and ignores the response body.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let payload = encode_body(body)?;
        let response = self
            .send_with_timeout(move |signal| with_json_body(Request::put(&url), signal, payload))
            .await?;

        handle_empty_response(response).await
    }

    /// Issues a DELETE and ignores the response body.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let response = self
            .send_with_timeout(|signal| {
                Request::delete(&url)
                    .abort_signal(Some(signal))
                    .build()
                    .map_err(build_error)
            })
            .await?;

        handle_empty_response(response).await
    }

    /// Sends a request with an abort timeout so a hung backend cannot pin the loading state.
    async fn send_with_timeout(
        &self,
        build_request: impl FnOnce(&AbortSignal) -> Result<Request, AppError>,
    ) -> Result<Response, AppError> {
        let controller = AbortController::new()
            .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
        let signal = controller.signal();
        let timeout_controller = controller.clone();
        let _timeout = Timeout::new(self.timeout_ms, move || timeout_controller.abort());

        let request = build_request(&signal)?;
        request.send().await.map_err(map_request_error)
    }
}

fn with_json_body(
    builder: RequestBuilder,
    signal: &AbortSignal,
    payload: String,
) -> Result<Request, AppError> {
    builder
        .header("Content-Type", "application/json")
        .abort_signal(Some(signal))
        .body(payload)
        .map_err(build_error)
}

fn build_error(err: gloo_net::Error) -> AppError {
    AppError::Serialization(format!("Failed to build request: {err}"))
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(http_error(status, &body))
    }
}

/// Handles responses whose body is ignored, returning sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.ok() {
        Ok(())
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(http_error(status, &body))
    }
}
