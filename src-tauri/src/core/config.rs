//! Application configuration.
//!
//! Values come from the process environment with built-in defaults. The
//! config is built once at startup and passed explicitly to the clients that
//! need it; nothing reads the environment afterwards.

use std::fmt;
use std::time::Duration;

/// Gemini model used for image edits
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Base URL of the Gemini REST API
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on a single edit call
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variables read by [`AppConfig::from_env`], in lookup order for the key.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];
pub const MODEL_VAR: &str = "RETOUCH_MODEL";
pub const API_BASE_VAR: &str = "RETOUCH_API_BASE";
pub const TIMEOUT_VAR: &str = "RETOUCH_TIMEOUT_SECS";

#[derive(Clone)]
pub struct AppConfig {
    /// Credential for the model API; `None` fails every edit before any network attempt
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL without a trailing slash
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Keeps the key out of logs
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl AppConfig {
    /// Build the config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            api_key: API_KEY_VARS.iter().find_map(|name| non_empty(*name)),
            model: non_empty(MODEL_VAR).unwrap_or(defaults.model),
            api_base: non_empty(API_BASE_VAR)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            request_timeout: non_empty(TIMEOUT_VAR)
                .and_then(|secs| secs.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Same config with an explicit key, mainly for tests and embedding.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
