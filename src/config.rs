//! Generation service configuration.
//!
//! Configuration is read from the process environment once at startup and
//! carried in an explicit struct from then on. A missing API key does not
//! abort startup: it is logged as a diagnostic, and every generation call
//! fails fast with a configuration error until the key is provided.

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable optionally overriding the model name.
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Default model used for visualization generation.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for the Gemini generation client.
///
/// Created once at process start and read-only thereafter. The base URL is
/// overridable so tests can point the client at a local mock server.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API credential. `None` when the environment variable is absent or empty.
    pub api_key: Option<String>,
    /// Model name, e.g. `gemini-3-pro-preview`.
    pub model: String,
    /// Service base URL without a trailing slash.
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Read configuration from the process environment.
    ///
    /// An empty `GEMINI_API_KEY` is treated the same as an absent one.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = std::env::var(MODEL_ENV)
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL (used by tests to target a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Whether a credential is available.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
