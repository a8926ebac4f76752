/// OpenAI chat completions client
use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::CompletionClient,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if it carries any
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    http_client: HttpClient,
    api_key: String,
    organization: Option<String>,
    api_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        organization: Option<String>,
        api_url: String,
        model: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            organization: organization.filter(|org| !org.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_organization.clone(),
            config.openai_api_url.clone(),
            config.openai_model.clone(),
            config.upstream_timeout(),
        )
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.api_url);

        let mut request = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: system,
                    },
                    ChatMessage {
                        role: "user",
                        content: user,
                    },
                ],
                max_tokens,
            });

        if let Some(organization) = &self.organization {
            request = request.header(ORGANIZATION_HEADER, organization);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "Completion request failed");
            AppError::completion(e)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Completion API returned an error status");
            return Err(AppError::completion(format!(
                "Completion API returned status {}",
                status
            )));
        }

        let data: ChatResponse = response.json().await.map_err(|e| AppError::completion(e))?;
        let content = data
            .into_content()
            .ok_or_else(|| AppError::completion("Invalid AI response"))?;

        tracing::debug!(
            model = %self.model,
            chars = content.len(),
            "Completion received"
        );

        Ok(content)
    }
}
