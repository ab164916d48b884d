//! Content requests and the flow routing table

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{research::ResearchDepth, CrewError, Result};

pub const CONTAINER_ID: &str = "ai-writing-flow-v1";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Technical,
    Viral,
    #[default]
    #[serde(other)]
    Standard,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Standard => "STANDARD",
            ContentType::Technical => "TECHNICAL",
            ContentType::Viral => "VIRAL",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentOwnership {
    Original,
    #[default]
    #[serde(other)]
    External,
}

impl ContentOwnership {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentOwnership::External => "EXTERNAL",
            ContentOwnership::Original => "ORIGINAL",
        }
    }
}

fn default_platform() -> String {
    "LinkedIn".to_string()
}

/// A piece of content to write
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ContentRequest {
    pub title: String,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub content_ownership: ContentOwnership,
    /// 1 strategic, 2 tactical, 3 technical; derived from the content type when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub depth_level: Option<u8>,
    /// Audience description handed to the writer; defaults to the depth's tone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub audience_insights: Option<String>,
}

impl ContentRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content_type: ContentType::default(),
            platform: default_platform(),
            content_ownership: ContentOwnership::default(),
            depth_level: None,
            audience_insights: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CrewError::Validation("title must not be empty".to_string()));
        }
        if self.platform.trim().is_empty() {
            return Err(CrewError::Validation("platform must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn skips_research(&self) -> bool {
        self.content_ownership == ContentOwnership::Original
    }

    pub fn depth_level(&self) -> u8 {
        self.depth_level.unwrap_or(match self.content_type {
            ContentType::Technical => 3,
            ContentType::Viral => 1,
            ContentType::Standard => 2,
        })
    }

    pub fn audience_tone(&self) -> String {
        if let Some(insights) = &self.audience_insights {
            return insights.clone();
        }
        match self.depth_level() {
            1 => "strategic",
            3 => "technical",
            _ => "tactical",
        }
        .to_string()
    }

    pub fn research_depth(&self) -> ResearchDepth {
        if self.content_type == ContentType::Technical {
            ResearchDepth::Deep
        } else {
            ResearchDepth::Standard
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    SkipResearchFlow,
    TechnicalDeepDiveFlow,
    ViralEngagementFlow,
    StandardEditorialFlow,
}

impl RouteDecision {
    /// Ownership wins over content type
    pub fn for_request(request: &ContentRequest) -> Self {
        if request.skips_research() {
            return RouteDecision::SkipResearchFlow;
        }
        match request.content_type {
            ContentType::Technical => RouteDecision::TechnicalDeepDiveFlow,
            ContentType::Viral => RouteDecision::ViralEngagementFlow,
            ContentType::Standard => RouteDecision::StandardEditorialFlow,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct RoutingResult {
    pub status: String,
    pub input: ContentRequest,
    pub route_decision: RouteDecision,
    pub skip_research: bool,
    pub container_id: String,
}

pub fn route(request: &ContentRequest) -> RoutingResult {
    let route_decision = RouteDecision::for_request(request);
    tracing::info!("[FLOW] Routed '{}' to {:?}", request.title, route_decision);

    RoutingResult {
        status: "routed".to_string(),
        input: request.clone(),
        route_decision,
        skip_research: request.skips_research(),
        container_id: CONTAINER_ID.to_string(),
    }
}
