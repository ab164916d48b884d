//! Flow orchestration: routing, research and drafting, tracked or not

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::json;
use ts_rs::TS;

use crate::{
    agents::{AgentRole, AgentTask},
    brain::LLMProviderTrait,
    research::{run_research, ResearchOutcome, ResearchRequest},
    routing::{self, ContentRequest, RouteDecision, RoutingResult},
    store::FlowStore,
    tracker::{generate_flow_id, ContentLoss, FlowExecutionRecord, FlowTracker, StepOutcome, StepStatus},
    writer::{
        DraftMetadata, DraftOutcome, GenerateDraftRequest, PublishedDraft, WriterCrew,
        WritingBrief,
    },
    CrewConfig, CrewError, Result,
};

const RESEARCH_INPUT_FACTOR: usize = 50;
const RESEARCH_OUTPUT_FACTOR: usize = 5;
const DRAFT_INPUT_FACTOR: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ExecutionLogEntry {
    pub step: String,
    #[ts(type = "unknown")]
    pub result: serde_json::Value,
    pub duration_ms: u64,
}

/// Consolidated log of an untracked flow
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct FlowReport {
    pub flow_id: String,
    pub status: String,
    pub routing_decision: RouteDecision,
    pub execution_log: Vec<ExecutionLogEntry>,
    pub final_draft: Option<PublishedDraft>,
    pub total_duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct TrackedFlowSummary {
    pub flow_id: String,
    pub status: String,
    pub diagnostic_url: String,
    #[ts(type = "unknown")]
    pub final_draft: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verification {
    Verified {
        api_type: String,
        response: String,
        execution_time_seconds: f64,
        timestamp: DateTime<Utc>,
        api_key_configured: bool,
        model: String,
    },
    Error {
        error: String,
        api_key_configured: bool,
    },
}

/// Runs writing flows against one completion provider
pub struct WritingFlow {
    provider: Arc<dyn LLMProviderTrait>,
    config: CrewConfig,
    rng: Mutex<StdRng>,
    store: FlowStore,
}

impl WritingFlow {
    pub fn new(provider: Arc<dyn LLMProviderTrait>, config: CrewConfig) -> Self {
        Self::with_rng(provider, config, StdRng::from_entropy())
    }

    /// Reproducible structure, hook and insight choices
    pub fn with_seed(provider: Arc<dyn LLMProviderTrait>, config: CrewConfig, seed: u64) -> Self {
        Self::with_rng(provider, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(provider: Arc<dyn LLMProviderTrait>, config: CrewConfig, rng: StdRng) -> Self {
        let store = FlowStore::new(&config.store);
        Self {
            provider,
            config,
            rng: Mutex::new(rng),
            store,
        }
    }

    pub fn config(&self) -> &CrewConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn LLMProviderTrait {
        self.provider.as_ref()
    }

    pub fn store(&self) -> &FlowStore {
        &self.store
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn route(&self, request: &ContentRequest) -> RoutingResult {
        routing::route(request)
    }

    /// Research with completion failures folded into the outcome
    pub async fn research(&self, request: &ResearchRequest) -> ResearchOutcome {
        match run_research(self.provider(), &self.config, request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("[RESEARCH] '{}' failed: {}", request.topic, err);
                ResearchOutcome::Error {
                    error: err.to_string(),
                    topic: request.topic.clone(),
                }
            }
        }
    }

    /// Draft with completion failures folded into the outcome
    pub async fn generate_draft(&self, request: &GenerateDraftRequest) -> DraftOutcome {
        match self.write_draft(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!("[WRITER] '{}' failed: {}", request.content.title, err);
                DraftOutcome::Error {
                    error: err.to_string(),
                }
            }
        }
    }

    async fn write_draft(&self, request: &GenerateDraftRequest) -> Result<DraftOutcome> {
        let content = &request.content;
        let brief = WritingBrief::from_request(content, request.research_summary());
        let crew = WriterCrew::with_agent(AgentRole::platform_writer(&content.platform, &content.title));

        // the guard must be gone before the completion call
        let plan = {
            let mut rng = self.rng();
            crew.plan(&brief, &mut *rng)?
        };

        let draft = crew
            .execute(&brief, plan, self.provider(), &self.config)
            .await?;

        Ok(DraftOutcome::Completed {
            draft: PublishedDraft::new(draft, &content.platform),
            metadata: DraftMetadata {
                generated_at: Utc::now(),
                content_type: content.content_type,
                used_research: request.research_data.is_some(),
            },
        })
    }

    /// routing, research unless skipped, then drafting; nothing is stored
    pub async fn execute(&self, request: &ContentRequest) -> Result<FlowReport> {
        let started = Instant::now();
        let flow_id = generate_flow_id();
        let mut execution_log = Vec::new();

        tracing::info!("[FLOW] {} starting for '{}'", flow_id, request.title);

        let step_start = Instant::now();
        let routing = self.route(request);
        execution_log.push(ExecutionLogEntry {
            step: "routing".to_string(),
            result: serde_json::to_value(&routing)?,
            duration_ms: step_start.elapsed().as_millis() as u64,
        });

        let mut research_data = None;
        if !routing.skip_research {
            let step_start = Instant::now();
            let outcome = self
                .research(&ResearchRequest {
                    topic: request.title.clone(),
                    depth: request.research_depth(),
                    skip_research: false,
                })
                .await;
            let result = serde_json::to_value(&outcome)?;
            execution_log.push(ExecutionLogEntry {
                step: "research".to_string(),
                result: result.clone(),
                duration_ms: step_start.elapsed().as_millis() as u64,
            });
            research_data = Some(result);
        }

        let step_start = Instant::now();
        let draft = self
            .generate_draft(&GenerateDraftRequest {
                content: request.clone(),
                research_data,
            })
            .await;
        execution_log.push(ExecutionLogEntry {
            step: "draft_generation".to_string(),
            result: serde_json::to_value(&draft)?,
            duration_ms: step_start.elapsed().as_millis() as u64,
        });

        let final_draft = draft.draft().cloned();
        let status = if final_draft.is_some() { "completed" } else { "failed" };
        tracing::info!("[FLOW] {} {}", flow_id, status);

        Ok(FlowReport {
            flow_id,
            status: status.to_string(),
            routing_decision: routing.route_decision,
            execution_log,
            final_draft,
            total_duration_ms: started.elapsed().as_millis() as u64,
        })
    }

    /// Like [`execute`](Self::execute) but every step is recorded and the
    /// record is kept for diagnostics.
    pub async fn execute_tracked(&self, request: &ContentRequest) -> Result<TrackedFlowSummary> {
        let mut tracker = FlowTracker::new();
        let flow_id = tracker.flow_id().to_string();
        tracing::info!("[FLOW] {} tracked run for '{}'", flow_id, request.title);

        let request_json = serde_json::to_value(request)?;

        let validated = tracker
            .run_step("input_validation", "Input Validation", Some(request_json), || async move {
                request.validate()?;
                let research_note = if request.skips_research() {
                    "research skipped"
                } else {
                    "research required"
                };
                Ok::<_, CrewError>(StepOutcome::new(json!({
                    "validated": true,
                    "content_type": request.content_type,
                    "platform": request.platform,
                    "ownership": request.content_ownership,
                }))
                .with_decisions(vec![
                    format!("Detected content type: {}", request.content_type.as_str()),
                    format!("Target platform: {}", request.platform),
                    format!(
                        "Ownership: {} - {}",
                        request.content_ownership.as_str(),
                        research_note
                    ),
                ]))
            })
            .await
            .status
            == StepStatus::Completed;

        if !validated {
            for (id, name) in [("research", "Topic Research"), ("draft_generation", "Draft Generation")] {
                tracker.skip_step(id, name, vec!["Input validation failed".to_string()]);
            }
            return self.store_tracked(tracker, None).await;
        }

        if request.skips_research() {
            tracker.skip_step(
                "research",
                "Topic Research",
                vec![
                    "Research skipped for ORIGINAL content".to_string(),
                    "skip_research flag = true".to_string(),
                ],
            );
        } else {
            let research_request = ResearchRequest {
                topic: request.title.clone(),
                depth: request.research_depth(),
                skip_research: false,
            };
            let input = serde_json::to_value(&research_request)?;

            tracker
                .run_step("research", "Topic Research", Some(input), || async move {
                    let outcome =
                        run_research(self.provider(), &self.config, &research_request).await?;
                    let (key_points, word_count) = outcome
                        .findings()
                        .map(|f| (f.key_points.len(), f.word_count))
                        .unwrap_or_default();

                    Ok::<_, CrewError>(StepOutcome::new(serde_json::to_value(&outcome)?)
                        .with_decisions(vec![
                            format!("Ran {} research", research_request.depth.as_str()),
                            format!("Found {} key points", key_points),
                            format!("Execution time: {}ms", outcome.execution_time_ms()),
                        ])
                        .with_content_loss(ContentLoss::compute(
                            request.title.len() * RESEARCH_INPUT_FACTOR,
                            word_count * RESEARCH_OUTPUT_FACTOR,
                        )))
                })
                .await;
        }

        let research_data = tracker
            .step("research")
            .filter(|step| step.status == StepStatus::Completed)
            .and_then(|step| step.output.clone());
        let draft_request = GenerateDraftRequest {
            content: request.clone(),
            research_data,
        };
        let input = serde_json::to_value(&draft_request)?;

        tracker
            .run_step("draft_generation", "Draft Generation", Some(input), || async move {
                let input_size = serde_json::to_string(&draft_request)?.len() * DRAFT_INPUT_FACTOR;
                let outcome = self.write_draft(&draft_request).await?;
                let (word_count, output_size) = outcome
                    .draft()
                    .map(|d| (d.word_count, d.content.len()))
                    .unwrap_or_default();

                Ok::<_, CrewError>(StepOutcome::new(serde_json::to_value(&outcome)?)
                    .with_decisions(vec![
                        format!("Draft written by the {} Content Writer agent", request.platform),
                        format!("Length: {} words", word_count),
                        format!(
                            "Research used: {}",
                            if draft_request.research_data.is_some() { "yes" } else { "no" }
                        ),
                        format!("Platform: {}", request.platform),
                    ])
                    .with_content_loss(ContentLoss::compute(input_size, output_size)))
            })
            .await;

        let final_draft = tracker
            .step("draft_generation")
            .filter(|step| step.status == StepStatus::Completed)
            .and_then(|step| step.output.as_ref())
            .and_then(|output| output.get("draft").cloned());

        self.store_tracked(tracker, final_draft).await
    }

    async fn store_tracked(
        &self,
        tracker: FlowTracker,
        final_draft: Option<serde_json::Value>,
    ) -> Result<TrackedFlowSummary> {
        let record = tracker.finish();
        let flow_id = record.flow_id.clone();
        let status = record.status().to_string();
        self.store.insert(record).await;

        tracing::info!("[FLOW] {} tracked run {}", flow_id, status);

        Ok(TrackedFlowSummary {
            diagnostic_url: format!("/api/flow-diagnostics/{}", flow_id),
            flow_id,
            status,
            final_draft,
        })
    }

    pub async fn diagnostics(&self, flow_id: &str) -> Option<Arc<FlowExecutionRecord>> {
        self.store.get(flow_id).await
    }

    /// One round trip to the completion service, timed
    pub async fn verify(&self) -> Verification {
        let api_key_configured = self.provider.is_configured();
        let started = Instant::now();

        let task = AgentTask::new(
            format!(
                "Generate ONE short sentence with current timestamp: {}",
                Utc::now().to_rfc3339()
            ),
            "One unique sentence",
        );

        match AgentRole::verifier()
            .kickoff(&task, self.provider(), &self.config)
            .await
        {
            Ok(response) => {
                let seconds = started.elapsed().as_secs_f64();
                Verification::Verified {
                    api_type: format!(
                        "{} {}",
                        self.provider.name(),
                        self.config.model.to_uppercase()
                    ),
                    response: response.content,
                    execution_time_seconds: (seconds * 100.0).round() / 100.0,
                    timestamp: Utc::now(),
                    api_key_configured,
                    model: response.model.unwrap_or_else(|| self.config.model.clone()),
                }
            }
            Err(err) => {
                tracing::warn!("completion service verification failed: {}", err);
                Verification::Error {
                    error: err.to_string(),
                    api_key_configured,
                }
            }
        }
    }
}
