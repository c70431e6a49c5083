//! Remote API configuration.
//!
//! The browser build has no process environment, so the base URL is baked in
//! at compile time from `SOFTLINK_API_URL`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Base URL used when `SOFTLINK_API_URL` was not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Location of the SoftLink REST API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Build a config for an explicit base URL. Trailing slashes are dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Read the compile-time `SOFTLINK_API_URL`, falling back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_value(option_env!("SOFTLINK_API_URL"))
    }

    fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    /// Absolute URL for an API path such as `/users/me`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
