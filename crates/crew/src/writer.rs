//! Draft writing: agent completion wrapped in hook, structure and style rules

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    agents::{AgentRole, AgentTask},
    brain::LLMProviderTrait,
    hooks::{extract_insights, generate_hook},
    routing::{ContentRequest, ContentType},
    structure::{select_structure, StructureSpec, StructureType},
    style::apply_style,
    tables::target_words,
    CrewConfig, Result,
};

pub const DRAFT_FOOTER: &str = "---\n*Generated by Vector Wave AI Writing System*";

/// Finished draft with the skeleton it was written against
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DraftContent {
    pub title: String,
    pub draft: String,
    pub word_count: usize,
    pub structure_type: StructureType,
    pub key_sections: Vec<String>,
    pub non_obvious_insights: Vec<String>,
}

/// Everything the writer needs to know about the piece
#[derive(Debug, Clone)]
pub struct WritingBrief {
    pub topic: String,
    pub platform: String,
    pub audience_insights: String,
    pub research_summary: String,
    pub depth_level: u8,
    pub content_type: ContentType,
}

impl WritingBrief {
    pub fn from_request(content: &ContentRequest, research_summary: Option<String>) -> Self {
        Self {
            topic: content.title.clone(),
            platform: content.platform.clone(),
            audience_insights: content.audience_tone(),
            research_summary: research_summary.unwrap_or_default(),
            depth_level: content.depth_level(),
            content_type: content.content_type,
        }
    }
}

/// Randomised parts of a draft, drawn before the completion call
#[derive(Debug, Clone)]
pub struct DraftPlan {
    pub structure: StructureSpec,
    pub hook: String,
    pub insights: Vec<String>,
}

pub struct WriterCrew {
    agent: AgentRole,
}

impl Default for WriterCrew {
    fn default() -> Self {
        Self::new()
    }
}

impl WriterCrew {
    pub fn new() -> Self {
        Self::with_agent(AgentRole::content_strategist())
    }

    pub fn with_agent(agent: AgentRole) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> &AgentRole {
        &self.agent
    }

    pub fn plan<R: Rng + ?Sized>(&self, brief: &WritingBrief, rng: &mut R) -> Result<DraftPlan> {
        let structure = select_structure(&brief.topic, brief.depth_level, &brief.platform, rng);
        let hook = generate_hook(&brief.topic, &brief.audience_insights, &brief.platform, rng);
        let insights = extract_insights(&brief.topic, rng)?;

        Ok(DraftPlan {
            structure,
            hook,
            insights,
        })
    }

    pub fn writing_task(&self, brief: &WritingBrief, structure: &StructureSpec) -> AgentTask {
        let research = if brief.research_summary.is_empty() {
            "none".to_string()
        } else {
            brief.research_summary.clone()
        };

        AgentTask::new(
            format!(
                "Write compelling content for: {topic}\n\
                 Platform: {platform}\n\
                 Content type: {content_type}\n\
                 Depth Level: {depth} (1=strategic, 2=tactical, 3=technical)\n\n\
                 Audience Insights: {audience}\n\
                 Research Summary: {research}\n\n\
                 Structure ({structure}): {sections}\n\n\
                 Requirements:\n\
                 1. Start with an irresistible hook\n\
                 2. Structure content for {platform} format\n\
                 3. Include 3+ non-obvious insights\n\
                 4. Back every claim with evidence\n\
                 5. Use concrete examples and stories\n\
                 6. End with clear next steps\n\n\
                 Style Guidelines:\n\
                 - No corporate jargon or buzzwords\n\
                 - Active voice, direct statements\n\
                 - Specific > Generic always\n\n\
                 Word count target: {words} words",
                topic = brief.topic,
                platform = brief.platform,
                content_type = brief.content_type.as_str(),
                depth = brief.depth_level,
                audience = brief.audience_insights,
                structure = structure.structure_type,
                sections = structure.sections.join(" | "),
                words = target_words(&brief.platform),
            ),
            "Complete draft with compelling hook, structured body, and clear call-to-action",
        )
    }

    /// Ask the agent for the body and assemble hook, body and footer
    pub async fn execute(
        &self,
        brief: &WritingBrief,
        plan: DraftPlan,
        provider: &dyn LLMProviderTrait,
        config: &CrewConfig,
    ) -> Result<DraftContent> {
        tracing::info!(
            "[WRITER] Writing {} draft '{}' for {}",
            plan.structure.structure_type,
            brief.topic,
            brief.platform
        );

        let task = self.writing_task(brief, &plan.structure);
        let response = self.agent.kickoff(&task, provider, config).await?;

        let raw = format!("{}\n\n{}\n\n{}\n", plan.hook, response.content, DRAFT_FOOTER);
        let draft = apply_style(&raw);
        let word_count = draft.split_whitespace().count();

        tracing::info!("[WRITER] Draft '{}' ready: {} words", brief.topic, word_count);

        Ok(DraftContent {
            title: brief.topic.clone(),
            draft,
            word_count,
            structure_type: plan.structure.structure_type,
            key_sections: plan.structure.sections,
            non_obvious_insights: plan.insights,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct GenerateDraftRequest {
    pub content: ContentRequest,
    /// Body of an earlier research response, if any
    #[serde(default)]
    #[ts(type = "unknown")]
    pub research_data: Option<serde_json::Value>,
}

impl GenerateDraftRequest {
    /// `findings.summary` of the attached research, when present
    pub fn research_summary(&self) -> Option<String> {
        self.research_data
            .as_ref()?
            .get("findings")?
            .get("summary")?
            .as_str()
            .map(String::from)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct PublishedDraft {
    pub title: String,
    pub content: String,
    pub platform: String,
    pub word_count: usize,
    pub optimized_for: String,
    pub structure_type: StructureType,
    pub key_sections: Vec<String>,
    pub non_obvious_insights: Vec<String>,
}

impl PublishedDraft {
    pub fn new(draft: DraftContent, platform: &str) -> Self {
        Self {
            title: draft.title,
            content: draft.draft,
            platform: platform.to_string(),
            word_count: draft.word_count,
            optimized_for: platform.to_string(),
            structure_type: draft.structure_type,
            key_sections: draft.key_sections,
            non_obvious_insights: draft.non_obvious_insights,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DraftMetadata {
    pub generated_at: DateTime<Utc>,
    pub content_type: ContentType,
    pub used_research: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DraftOutcome {
    Completed {
        draft: PublishedDraft,
        metadata: DraftMetadata,
    },
    Error {
        error: String,
    },
}

impl DraftOutcome {
    pub fn draft(&self) -> Option<&PublishedDraft> {
        match self {
            DraftOutcome::Completed { draft, .. } => Some(draft),
            DraftOutcome::Error { .. } => None,
        }
    }
}
