//! Build-time configuration for the users API with an optional runtime
//! override. In the browser the override is read from
//! `window.USERS_CRUD_CONFIG` (if present) so static deployments can point at a
//! different backend without rebuilding; native builds read process
//! environment variables with the same names as the build-time ones.
//! Configuration values are public; do not store secrets here.

use tracing::Level;

/// Default request timeout (milliseconds) applied to every API call.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Users collection on the serving origin, used when no URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "/users";

#[cfg(not(target_arch = "wasm32"))]
const ENV_API_URL: &str = "USERS_CRUD_API_URL";
#[cfg(not(target_arch = "wasm32"))]
const ENV_TIMEOUT_MS: &str = "USERS_CRUD_TIMEOUT_MS";
#[cfg(not(target_arch = "wasm32"))]
const ENV_LOG_LEVEL: &str = "USERS_CRUD_LOG_LEVEL";

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// URL of the users collection, e.g. `https://api.example.com/users`.
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let build_time = RuntimeConfig {
            api_base_url: option_env!("USERS_CRUD_API_URL").and_then(normalize_runtime_value),
            request_timeout_ms: option_env!("USERS_CRUD_TIMEOUT_MS")
                .and_then(normalize_runtime_value),
            log_level: option_env!("USERS_CRUD_LOG_LEVEL").and_then(normalize_runtime_value),
        };

        let mut config = Self::default();
        apply_runtime_overrides(&mut config, build_time);

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Returns a copy pointing at another users collection.
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Returns a copy with another request timeout.
    #[must_use]
    pub fn with_request_timeout_ms(mut self, request_timeout_ms: u32) -> Self {
        self.request_timeout_ms = request_timeout_ms;
        self
    }
}

#[derive(Debug, Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    request_timeout_ms: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime
        .request_timeout_ms
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
    {
        config.request_timeout_ms = value;
    }
    if let Some(value) = runtime.log_level.as_deref().and_then(parse_log_level) {
        config.log_level = value;
    }
}

/// Parses a log level name (`error` .. `trace`) or its index (`0` .. `4`).
pub fn parse_log_level(level: &str) -> Option<Level> {
    let level = level.trim();

    if let Ok(parsed) = level.parse::<u8>() {
        return match parsed {
            0 => Some(Level::ERROR),
            1 => Some(Level::WARN),
            2 => Some(Level::INFO),
            3 => Some(Level::DEBUG),
            4 => Some(Level::TRACE),
            _ => None,
        };
    }

    match level.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("USERS_CRUD_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_url"),
        request_timeout_ms: read_runtime_value(&object, "timeout_ms"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    let read = |key: &str| {
        std::env::var(key)
            .ok()
            .and_then(|value| normalize_runtime_value(&value))
    };

    let runtime = RuntimeConfig {
        api_base_url: read(ENV_API_URL),
        request_timeout_ms: read(ENV_TIMEOUT_MS),
        log_level: read(ENV_LOG_LEVEL),
    };

    if runtime.api_base_url.is_none()
        && runtime.request_timeout_ms.is_none()
        && runtime.log_level.is_none()
    {
        None
    } else {
        Some(runtime)
    }
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    // Numbers are accepted for `timeout_ms`.
    let value = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| format!("{number:.0}")))?;
    normalize_runtime_value(&value)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
