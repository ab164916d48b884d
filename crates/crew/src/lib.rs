//! # Crew - AI Writing Flow
//!
//! Turns a topic into a platform-tailored draft by chaining a researcher and a
//! writer agent, then post-processing the generated text with rule-based
//! heuristics: structure selection, style filtering, hook generation and
//! audience scoring. Every tracked flow produces a step-by-step execution
//! record kept in a bounded in-memory store.

pub mod agents;
pub mod analysis;
pub mod brain;
pub mod flow;
pub mod hooks;
pub mod research;
pub mod routing;
pub mod scoring;
pub mod store;
pub mod structure;
pub mod style;
pub mod tables;
pub mod tracker;
pub mod writer;

#[cfg(test)]
mod test_support;

use std::time::Duration;

pub use agents::{AgentRole, AgentTask};
pub use analysis::{analyze_potential, AnalyzePotentialRequest, PotentialAnalysis, TopicSuggestion};
pub use brain::{
    ChatConfig, ChatMessage, ChatRequest, LLMProviderTrait, OpenAIProvider, ProviderError,
    ProviderResponse, ProviderType, TokenUsage,
};
pub use flow::{
    ExecutionLogEntry, FlowReport, TrackedFlowSummary, Verification, WritingFlow,
};
pub use hooks::{extract_insights, generate_hook};
pub use research::{extract_key_points, ResearchDepth, ResearchFindings, ResearchOutcome, ResearchRequest};
pub use routing::{ContentOwnership, ContentRequest, ContentType, RouteDecision, RoutingResult};
pub use scoring::{score_audience, score_virality, AudienceScoreMap, AudienceSegment};
pub use store::{FlowStore, FlowStoreConfig};
pub use structure::{select_structure, StructureSpec, StructureType};
pub use style::{apply_style, StyleRules};
pub use tables::PlatformLimit;
pub use tracker::{ContentLoss, FlowExecutionRecord, FlowTracker, StepOutcome, StepRecord, StepStatus};
pub use writer::{DraftContent, DraftOutcome, GenerateDraftRequest, WriterCrew};

/// Runtime configuration for the writing crew
#[derive(Debug, Clone)]
pub struct CrewConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Upper bound for a single completion call
    pub llm_timeout: Duration,
    /// Log composed prompts and raw completions at info level
    pub verbose: bool,
    pub store: FlowStoreConfig,
}

impl Default for CrewConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4".to_string(),
            endpoint: brain::OPENAI_CHAT_ENDPOINT.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            llm_timeout: Duration::from_secs(120),
            verbose: false,
            store: FlowStoreConfig::default(),
        }
    }
}

impl CrewConfig {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let llm_timeout = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.llm_timeout);

        let store = FlowStoreConfig {
            max_entries: std::env::var("FLOW_STORE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.store.max_entries),
            ttl: std::env::var("FLOW_STORE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .or(defaults.store.ttl),
        };

        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            endpoint: std::env::var("OPENAI_ENDPOINT").unwrap_or(defaults.endpoint),
            temperature: std::env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse::<f32>().ok())
                .unwrap_or(defaults.temperature),
            max_tokens: std::env::var("LLM_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.max_tokens),
            llm_timeout,
            verbose: std::env::var("CREW_VERBOSE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            store,
        }
    }

    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Main error type for crew operations
#[derive(Debug, thiserror::Error)]
pub enum CrewError {
    #[error("LLM error: {0}")]
    Provider(#[from] ProviderError),

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Template pool too small: need {needed}, have {available}")]
    InsufficientTemplates { needed: usize, available: usize },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid step transition: {0}")]
    InvalidTransition(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrewError>;
