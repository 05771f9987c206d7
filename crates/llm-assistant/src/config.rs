//! Configuration for CompletionsClient.

use std::env;
use std::time::Duration;

use assistant_core::AssistantError;

/// Default endpoint base URL.
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for CompletionsClient.
#[derive(Debug, Clone)]
pub struct CompletionsConfig {
    /// Endpoint base URL; `/v1/chat/completions` is appended.
    pub api_url: String,

    /// API key for bearer authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for a response, unless the request overrides it.
    pub max_tokens: Option<u32>,

    /// Temperature (0.0 - 2.0), unless the request overrides it.
    pub temperature: Option<f32>,

    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for CompletionsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.7),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CompletionsConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ASSISTANT_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `ASSISTANT_API_URL` - Endpoint base URL (default: https://api.openai.com)
    /// - `ASSISTANT_MODEL` - Model name (default: gpt-4o-mini)
    /// - `ASSISTANT_MAX_TOKENS` - Max tokens (default: 1024)
    /// - `ASSISTANT_TEMPERATURE` - Temperature (default: 0.7)
    /// - `ASSISTANT_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("ASSISTANT_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AssistantError::Configuration("ASSISTANT_API_KEY not set".to_string()))?;

        let api_url =
            env::var("ASSISTANT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("ASSISTANT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = env::var("ASSISTANT_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("ASSISTANT_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let timeout = env::var("ASSISTANT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> CompletionsConfigBuilder {
        CompletionsConfigBuilder::default()
    }

    /// Full URL of the completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for CompletionsConfig.
#[derive(Debug, Default)]
pub struct CompletionsConfigBuilder {
    config: CompletionsConfig,
}

impl CompletionsConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CompletionsConfig {
        self.config
    }
}
