//! OpenAI chat-completions provider

use async_trait::async_trait;
use reqwest::Client;

use super::provider_trait::{
    ChatMessage, ChatRequest, LLMProviderTrait, MessageRole, ProviderError, ProviderResponse,
    ProviderType, TokenUsage,
};
use crate::brain::OPENAI_CHAT_ENDPOINT;

/// OpenAI API provider
pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenAIProvider {
    /// Create a provider for the public OpenAI endpoint
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_endpoint(api_key, OPENAI_CHAT_ENDPOINT)
    }

    /// Create with a custom endpoint (e.g., for Azure OpenAI or local proxies)
    pub fn with_endpoint(api_key: Option<String>, endpoint: impl Into<String>) -> Self {
        if api_key.is_some() {
            tracing::info!("OpenAI provider initialized with API key");
        } else {
            tracing::warn!("OpenAI provider created without API key - OPENAI_API_KEY not set");
        }

        Self {
            client: Client::new(),
            api_key,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Convert our ChatMessage to OpenAI API format
    fn message_to_openai(&self, msg: &ChatMessage) -> serde_json::Value {
        let role = match msg.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        serde_json::json!({
            "role": role,
            "content": msg.content
        })
    }

    /// Parse OpenAI response into ProviderResponse
    fn parse_response(&self, json: &serde_json::Value) -> Result<ProviderResponse, ProviderError> {
        let message = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .ok_or_else(|| ProviderError::ParseError("response has no choices".to_string()))?;

        let usage = json.get("usage").and_then(|u| {
            Some(TokenUsage {
                input_tokens: u["prompt_tokens"].as_u64()? as u32,
                output_tokens: u["completion_tokens"].as_u64()? as u32,
                total_tokens: u["total_tokens"].as_u64()? as u32,
            })
        });

        let content = message["content"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        Ok(ProviderResponse {
            content,
            model: json["model"].as_str().map(String::from),
            usage,
        })
    }
}

#[async_trait]
impl LLMProviderTrait for OpenAIProvider {
    fn provider_type(&self) -> ProviderType {
        if self.endpoint == OPENAI_CHAT_ENDPOINT {
            ProviderType::OpenAI
        } else {
            ProviderType::Compatible
        }
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn chat(&self, request: ChatRequest) -> Result<ProviderResponse, ProviderError> {
        let auth_header = self
            .api_key
            .as_ref()
            .map(|k| format!("Bearer {}", k))
            .ok_or_else(|| ProviderError::AuthError("No OpenAI API key configured".to_string()))?;

        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|m| self.message_to_openai(m))
            .collect();

        let payload = serde_json::json!({
            "model": request.config.model,
            "temperature": request.config.temperature,
            "max_tokens": request.config.max_tokens,
            "messages": messages
        });

        tracing::debug!(
            "[OpenAI] Sending request: model={}, messages={}",
            request.config.model,
            messages.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", auth_header)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                let retry_after_ms = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(|secs| secs * 1000);
                return Err(ProviderError::RateLimited { retry_after_ms });
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        self.parse_response(&json)
    }
}
