//! Topic research through the analyst agent

use std::time::Instant;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    agents::{AgentRole, AgentTask},
    brain::LLMProviderTrait,
    CrewConfig, Result,
};

const MAX_KEY_POINTS: usize = 5;
const MIN_KEY_POINT_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum ResearchDepth {
    Quick,
    Deep,
    #[default]
    #[serde(other)]
    Standard,
}

impl ResearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchDepth::Quick => "quick",
            ResearchDepth::Standard => "standard",
            ResearchDepth::Deep => "deep",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ResearchRequest {
    pub topic: String,
    #[serde(default)]
    pub depth: ResearchDepth,
    #[serde(default)]
    pub skip_research: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ResearchFindings {
    pub summary: String,
    pub key_points: Vec<String>,
    pub word_count: usize,
}

impl ResearchFindings {
    pub fn from_text(text: &str) -> Self {
        Self {
            summary: text.to_string(),
            key_points: extract_key_points(text),
            word_count: text.split_whitespace().count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResearchOutcome {
    Skipped {
        reason: String,
        topic: String,
        findings: Vec<String>,
    },
    Completed {
        topic: String,
        depth: ResearchDepth,
        findings: ResearchFindings,
        execution_time_ms: u64,
    },
    Error {
        error: String,
        topic: String,
    },
}

impl ResearchOutcome {
    pub fn findings(&self) -> Option<&ResearchFindings> {
        match self {
            ResearchOutcome::Completed { findings, .. } => Some(findings),
            _ => None,
        }
    }

    pub fn execution_time_ms(&self) -> u64 {
        match self {
            ResearchOutcome::Completed {
                execution_time_ms, ..
            } => *execution_time_ms,
            _ => 0,
        }
    }
}

/// First five trimmed lines longer than 20 characters
pub fn extract_key_points(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_KEY_POINT_CHARS)
        .take(MAX_KEY_POINTS)
        .map(String::from)
        .collect()
}

pub fn research_task(topic: &str, depth: ResearchDepth) -> AgentTask {
    AgentTask::new(
        format!(
            "Research the topic: {}\nDepth level: {}\n\nProvide:\n\
             1. Key concepts and definitions\n\
             2. Current trends and developments\n\
             3. Proven approaches\n\
             4. Common challenges",
            topic,
            depth.as_str()
        ),
        "Comprehensive research findings",
    )
}

/// Research `request.topic`, or skip when asked to.
///
/// Completion failures come back as `Err`; callers that answer over the
/// wire turn them into [`ResearchOutcome::Error`].
pub async fn run_research(
    provider: &dyn LLMProviderTrait,
    config: &CrewConfig,
    request: &ResearchRequest,
) -> Result<ResearchOutcome> {
    if request.skip_research {
        tracing::info!("[RESEARCH] Skipping research for '{}'", request.topic);
        return Ok(ResearchOutcome::Skipped {
            reason: "skip_research flag is set".to_string(),
            topic: request.topic.clone(),
            findings: Vec::new(),
        });
    }

    tracing::info!(
        "[RESEARCH] Researching '{}' ({})",
        request.topic,
        request.depth.as_str()
    );

    let start = Instant::now();
    let response = AgentRole::researcher(&request.topic)
        .kickoff(&research_task(&request.topic, request.depth), provider, config)
        .await?;
    let execution_time_ms = start.elapsed().as_millis() as u64;

    let findings = ResearchFindings::from_text(&response.content);
    tracing::info!(
        "[RESEARCH] Finished '{}' in {}ms: {} words, {} key points",
        request.topic,
        execution_time_ms,
        findings.word_count,
        findings.key_points.len()
    );

    Ok(ResearchOutcome::Completed {
        topic: request.topic.clone(),
        depth: request.depth,
        findings,
        execution_time_ms,
    })
}
