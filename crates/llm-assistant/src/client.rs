//! CompletionsClient implementation.

use assistant_core::{async_trait, AssistantError, CompletionRequest, TextGenerator};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::CompletionsConfig;

/// A [`TextGenerator`] that calls an OpenAI-compatible
/// `/v1/chat/completions` endpoint. One HTTP request per completion.
pub struct CompletionsClient {
    client: Client,
    config: CompletionsConfig,
}

impl CompletionsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CompletionsConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AssistantError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "CompletionsClient initialized with model: {} at {}",
            config.model, config.api_url
        );

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`CompletionsConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, AssistantError> {
        Self::new(CompletionsConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompletionsConfig {
        &self.config
    }

    /// Request body for `request`, with config defaults filled in.
    pub(crate) fn build_request(&self, request: CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: request.messages,
            max_tokens: request.max_tokens.or(self.config.max_tokens),
            temperature: request.temperature.or(self.config.temperature),
        }
    }
}

#[async_trait]
impl TextGenerator for CompletionsClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AssistantError> {
        let url = self.config.completions_url();
        let body = self.build_request(request);

        debug!("Sending completion request with {} messages", body.messages.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error.describe(),
                Err(_) => error_text,
            };

            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AssistantError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        debug!(
            "Received completion with {} choices",
            completion.choices.len()
        );

        completion
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| AssistantError::MalformedResponse("no choices in response".to_string()))
    }

    fn name(&self) -> &str {
        "CompletionsClient"
    }
}
