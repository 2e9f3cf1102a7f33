use super::{AppError, build_url_with_base, encode_body, http_error};
use crate::app_lib::config::AppConfig;
use reqwest::{Client, Method, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// JSON client bound to one API base URL, backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Builds a client with the configured base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(u64::from(config.request_timeout_ms)))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            base_url: config.api_base_url.clone(),
            http,
        })
    }

    /// Fetches and decodes JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and ignores the response body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let request = self.json_request(Method::POST, path, body)?;
        let response = self.send(request).await?;
        handle_empty_response(response).await
    }

    /// Puts JSON and ignores the response body.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AppError> {
        let request = self.json_request(Method::PUT, path, body)?;
        let response = self.send(request).await?;
        handle_empty_response(response).await
    }

    /// Issues a DELETE and ignores the response body.
    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        handle_empty_response(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, build_url_with_base(&self.base_url, path))
    }

    fn json_request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestBuilder, AppError> {
        let payload = encode_body(body)?;
        Ok(self
            .request(method, path)
            .header(CONTENT_TYPE, "application/json")
            .body(payload))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        request.send().await.map_err(map_request_error)
    }
}

/// Maps transport errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        let body = response.text().await.map_err(map_request_error)?;
        serde_json::from_str::<T>(&body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

/// Handles responses whose body is ignored, returning sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    http_error(status, &body)
}
