use std::time::Duration;

use crate::{CrewError, Result};

pub mod providers;
pub use providers::{
    ChatConfig, ChatMessage, ChatRequest, LLMProviderTrait, MessageRole, OpenAIProvider,
    ProviderError, ProviderResponse, ProviderType, TokenUsage,
};

pub const OPENAI_CHAT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Run one chat request, giving up after `limit`.
///
/// Expiry is reported as [`CrewError::Timeout`]; the in-flight request is
/// dropped.
pub async fn complete(
    provider: &dyn LLMProviderTrait,
    request: ChatRequest,
    limit: Duration,
) -> Result<ProviderResponse> {
    match tokio::time::timeout(limit, provider.chat(request)).await {
        Ok(response) => Ok(response?),
        Err(_) => {
            tracing::warn!("[{}] completion exceeded {:?}", provider.name(), limit);
            Err(CrewError::Timeout(limit))
        }
    }
}
