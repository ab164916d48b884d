//! Completion-service abstraction
//!
//! The writing flow only needs plain text completions, so the trait exposes a
//! single `chat` call. Any OpenAI-compatible endpoint can sit behind
//! [`OpenAIProvider`].

mod openai;
mod provider_trait;

pub use openai::OpenAIProvider;
pub use provider_trait::{
    ChatConfig, ChatMessage, ChatRequest, LLMProviderTrait, MessageRole, ProviderError,
    ProviderResponse, ProviderType, TokenUsage,
};
