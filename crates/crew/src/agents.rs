//! Agent personas and the single-call task protocol they run

use serde::{Deserialize, Serialize};

use crate::{
    brain::{self, ChatMessage, ChatRequest, LLMProviderTrait, ProviderResponse},
    CrewConfig, Result,
};

/// Who the model is asked to be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRole {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

/// What the agent is asked to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTask {
    pub description: String,
    pub expected_output: String,
}

impl AgentTask {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    pub fn user_prompt(&self) -> String {
        format!(
            "{}\n\nExpected output: {}",
            self.description.trim(),
            self.expected_output
        )
    }
}

impl AgentRole {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    pub fn researcher(topic: &str) -> Self {
        Self::new(
            "Senior Research Analyst",
            format!("Research comprehensive information about {}", topic),
            "Expert researcher with access to vast knowledge",
        )
    }

    pub fn platform_writer(platform: &str, title: &str) -> Self {
        Self::new(
            format!("{} Content Writer", platform),
            format!("Write engaging {} content about {}", platform, title),
            format!("Expert {} content creator", platform),
        )
    }

    pub fn content_strategist() -> Self {
        Self::new(
            "Senior Content Strategist & Writer",
            "Create compelling content that resonates with the target audience while \
             maintaining Vector Wave's distinctive voice",
            "You are a seasoned content creator who has written for top tech publications \
             and helped numerous startups find their voice. Great content changes how people \
             think. You find non-obvious angles, back claims with evidence and make complex \
             topics accessible without dumbing them down. You never use corporate jargon or \
             empty phrases.",
        )
    }

    pub fn verifier() -> Self {
        Self::new(
            "Verification Agent",
            "Generate a unique timestamp-based message",
            "I verify API authenticity",
        )
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}.\n{}\n\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }

    /// Run `task` as this agent: one completion call, no tools, no delegation
    pub async fn kickoff(
        &self,
        task: &AgentTask,
        provider: &dyn LLMProviderTrait,
        config: &CrewConfig,
    ) -> Result<ProviderResponse> {
        let system = self.system_prompt();
        let user = task.user_prompt();

        if config.verbose {
            tracing::info!("[AGENT] {} system prompt:\n{}", self.role, system);
            tracing::info!("[AGENT] {} task:\n{}", self.role, user);
        } else {
            tracing::debug!("[AGENT] {} task:\n{}", self.role, user);
        }

        let request = ChatRequest {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            config: config.chat_config(),
        };

        let response = brain::complete(provider, request, config.llm_timeout).await?;

        if config.verbose {
            tracing::info!("[AGENT] {} answered:\n{}", self.role, response.content);
        } else {
            tracing::debug!(
                "[AGENT] {} answered with {} chars",
                self.role,
                response.content.len()
            );
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        brain::MessageRole,
        test_support::{Script, ScriptedProvider},
        CrewError,
    };

    #[test]
    fn test_platform_writer_role() {
        let role = AgentRole::platform_writer("Medium", "Edge AI");
        assert_eq!(role.role, "Medium Content Writer");
        assert!(role.goal.contains("Edge AI"));
    }

    #[test]
    fn test_prompts_embed_role_and_task() {
        let role = AgentRole::researcher("Rust");
        assert!(role.system_prompt().contains("Senior Research Analyst"));

        let task = AgentTask::new("  Research Rust  ", "Findings");
        assert_eq!(task.user_prompt(), "Research Rust\n\nExpected output: Findings");
    }

    #[tokio::test]
    async fn test_kickoff_sends_system_and_user_messages() {
        let provider = ScriptedProvider::new(Script::reply("done"));
        let config = CrewConfig::default();

        let response = AgentRole::verifier()
            .kickoff(&AgentTask::new("Say hi", "One sentence"), &provider, &config)
            .await
            .unwrap();

        assert_eq!(response.content, "done");
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].role, MessageRole::System);
        assert_eq!(requests[0].messages[1].role, MessageRole::User);
        assert_eq!(requests[0].config.model, "gpt-4");
    }

    #[tokio::test]
    async fn test_kickoff_times_out() {
        let provider = ScriptedProvider::new(Script::Stall(Duration::from_secs(5)));
        let config = CrewConfig {
            llm_timeout: Duration::from_millis(20),
            ..CrewConfig::default()
        };

        let err = AgentRole::verifier()
            .kickoff(&AgentTask::new("Say hi", "One sentence"), &provider, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, CrewError::Timeout(_)));
    }
}
