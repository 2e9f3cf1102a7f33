use thiserror::Error;

/// Failures surfaced by the users console.
///
/// Values are cloned into UI state, so every variant carries an owned,
/// user-presentable message rather than the underlying transport error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}
