use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// Fixed sampling parameters for the recommendation call
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 4096;

/// Chat-completion client abstraction
///
/// The orchestrator receives this as an injected dependency rather than a
/// shared global handle, so tests can substitute a double and count calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends one system + user message pair and returns the first
    /// completion's raw text content.
    async fn complete(&self, system: &str, user: &str) -> AppResult<String>;
}

// Wire types for the chat-completions endpoint

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Perplexity chat-completions client
#[derive(Clone)]
pub struct PerplexityClient {
    http_client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl PerplexityClient {
    /// Builds the client from configuration.
    ///
    /// The upstream call carries a total request timeout; a slow provider
    /// fails the request instead of hanging it.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.perplexity_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.perplexity_api_key.clone(),
            api_url: config.perplexity_api_url.clone(),
            model: config.perplexity_model.clone(),
        })
    }

    #[cfg(test)]
    fn for_tests(api_key: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            api_url: "http://test.local".to_string(),
            model: "sonar".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionClient for PerplexityClient {
    async fn complete(&self, system: &str, user: &str) -> AppResult<String> {
        // Fatal configuration problem, surfaced before any network attempt
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "PERPLEXITY_API_KEY não configurada".to_string(),
            ));
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.api_url);

        tracing::debug!(model = %self.model, "Perplexity chat request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Perplexity request failed");
            return Err(AppError::UpstreamApi {
                status: status.as_u16(),
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        // The upstream occasionally returns a choice with no content;
        // downstream parsing turns that into a malformed-response error.
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        tracing::debug!(length = content.len(), "Perplexity response received");

        Ok(content)
    }
}
