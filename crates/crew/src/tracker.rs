//! Step-by-step execution record for tracked flows

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{CrewError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Completed,
    Skipped,
    Failed,
}

impl StepStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::Completed => "completed",
            StepStatus::Skipped => "skipped",
            StepStatus::Failed => "failed",
        }
    }
}

/// Rough size comparison across a transforming step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ContentLoss {
    pub input_size: usize,
    pub output_size: usize,
    /// `100 * (1 - output/input)`, one decimal. Negative when the step grew
    /// the content; 0 when there was no input.
    pub loss_percentage: f64,
}

impl ContentLoss {
    pub fn compute(input_size: usize, output_size: usize) -> Self {
        let loss_percentage = if input_size == 0 {
            0.0
        } else {
            let ratio = output_size as f64 / input_size as f64;
            ((1.0 - ratio) * 100.0 * 10.0).round() / 10.0
        };

        Self {
            input_size,
            output_size,
            loss_percentage,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct StepRecord {
    pub id: String,
    pub name: String,
    pub status: StepStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[ts(type = "unknown")]
    pub input: Option<serde_json::Value>,
    #[ts(type = "unknown")]
    pub output: Option<serde_json::Value>,
    pub agent_decisions: Vec<String>,
    pub content_loss: Option<ContentLoss>,
    pub errors: Vec<String>,
}

impl StepRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: StepStatus::Pending,
            start_time: None,
            end_time: None,
            input: None,
            output: None,
            agent_decisions: Vec::new(),
            content_loss: None,
            errors: Vec::new(),
        }
    }

    fn transition(&mut self, to: StepStatus) -> Result<()> {
        if self.status.is_terminal() {
            return Err(CrewError::InvalidTransition(format!(
                "step '{}' is already {}",
                self.id,
                self.status.as_str()
            )));
        }
        if !to.is_terminal() {
            return Err(CrewError::InvalidTransition(format!(
                "step '{}' cannot return to {}",
                self.id,
                to.as_str()
            )));
        }
        self.status = to;
        Ok(())
    }

    pub fn complete(&mut self, outcome: StepOutcome) -> Result<()> {
        self.transition(StepStatus::Completed)?;
        self.output = Some(outcome.output);
        self.agent_decisions = outcome.agent_decisions;
        self.content_loss = outcome.content_loss;
        Ok(())
    }

    /// Skipped steps never ran, so they keep no timestamps
    pub fn skip(&mut self, agent_decisions: Vec<String>) -> Result<()> {
        self.transition(StepStatus::Skipped)?;
        self.agent_decisions = agent_decisions;
        Ok(())
    }

    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(StepStatus::Failed)?;
        self.errors.push(error.into());
        Ok(())
    }

    /// Wall-clock time between start and end, when both were captured
    pub fn elapsed_ms(&self) -> Option<f64> {
        let (start, end) = (self.start_time?, self.end_time?);
        let micros = (end - start).num_microseconds()?;
        Some(micros as f64 / 1000.0)
    }
}

/// What a successful work unit hands back to the tracker
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub output: serde_json::Value,
    pub agent_decisions: Vec<String>,
    pub content_loss: Option<ContentLoss>,
}

impl StepOutcome {
    pub fn new(output: serde_json::Value) -> Self {
        Self {
            output,
            agent_decisions: Vec::new(),
            content_loss: None,
        }
    }

    pub fn with_decisions(mut self, decisions: Vec<String>) -> Self {
        self.agent_decisions = decisions;
        self
    }

    pub fn with_content_loss(mut self, loss: ContentLoss) -> Self {
        self.content_loss = Some(loss);
        self
    }
}

/// Finished flow as kept by the diagnostics store
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct FlowExecutionRecord {
    pub flow_id: String,
    pub steps: Vec<StepRecord>,
    pub created_at: DateTime<Utc>,
    pub total_duration_ms: f64,
}

impl FlowExecutionRecord {
    /// `completed` when every step completed or was skipped
    pub fn status(&self) -> &'static str {
        let ok = self
            .steps
            .iter()
            .all(|s| matches!(s.status, StepStatus::Completed | StepStatus::Skipped));
        if ok { "completed" } else { "failed" }
    }

    pub fn step(&self, id: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.id == id)
    }
}

/// `flow_{unix_seconds}_{8 hex}`
pub fn generate_flow_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("flow_{}_{}", Utc::now().timestamp(), &suffix[..8])
}

/// Runs the steps of one flow in order and records each of them
pub struct FlowTracker {
    flow_id: String,
    created_at: DateTime<Utc>,
    steps: Vec<StepRecord>,
}

impl Default for FlowTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowTracker {
    pub fn new() -> Self {
        Self::with_id(generate_flow_id())
    }

    pub fn with_id(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: flow_id.into(),
            created_at: Utc::now(),
            steps: Vec::new(),
        }
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn step(&self, id: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Execute `work` as a new step.
    ///
    /// The first error from `work` fails the step; nothing is retried and
    /// later steps still run.
    pub async fn run_step<F, Fut>(
        &mut self,
        id: &str,
        name: &str,
        input: Option<serde_json::Value>,
        work: F,
    ) -> &StepRecord
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StepOutcome>>,
    {
        let mut step = StepRecord::new(id, name);
        step.input = input;

        tracing::info!("[TRACKER] {} step '{}' started", self.flow_id, id);
        step.start_time = Some(Utc::now());
        let result = work().await;
        step.end_time = Some(Utc::now());

        let transition = match result {
            Ok(outcome) => step.complete(outcome),
            Err(err) => {
                tracing::error!("[TRACKER] {} step '{}' failed: {}", self.flow_id, id, err);
                step.fail(err.to_string())
            }
        };
        if let Err(err) = transition {
            tracing::warn!("[TRACKER] {}", err);
        }

        tracing::info!(
            "[TRACKER] {} step '{}' {} in {:.1}ms",
            self.flow_id,
            id,
            step.status.as_str(),
            step.elapsed_ms().unwrap_or_default()
        );

        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    pub fn skip_step(&mut self, id: &str, name: &str, agent_decisions: Vec<String>) -> &StepRecord {
        let mut step = StepRecord::new(id, name);
        if let Err(err) = step.skip(agent_decisions) {
            tracing::warn!("[TRACKER] {}", err);
        }
        tracing::info!("[TRACKER] {} step '{}' skipped", self.flow_id, id);

        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    pub fn finish(self) -> FlowExecutionRecord {
        let total_duration_ms = self.steps.iter().filter_map(StepRecord::elapsed_ms).sum();

        FlowExecutionRecord {
            flow_id: self.flow_id,
            steps: self.steps,
            created_at: self.created_at,
            total_duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_content_loss_formula() {
        let loss = ContentLoss::compute(200, 50);
        assert_eq!(loss.loss_percentage, 75.0);

        let loss = ContentLoss::compute(3, 1);
        assert_eq!(loss.loss_percentage, 66.7);
    }

    #[test]
    fn test_content_loss_zero_input() {
        assert_eq!(ContentLoss::compute(0, 500).loss_percentage, 0.0);
    }

    #[test]
    fn test_content_loss_growth_is_negative() {
        assert_eq!(ContentLoss::compute(100, 250).loss_percentage, -150.0);
    }

    #[test]
    fn test_content_loss_serializes_camel_case() {
        let json = serde_json::to_value(ContentLoss::compute(10, 5)).unwrap();
        assert_eq!(json["inputSize"], 10);
        assert_eq!(json["outputSize"], 5);
        assert_eq!(json["lossPercentage"], 50.0);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut step = StepRecord::new("research", "Research");
        step.complete(StepOutcome::new(serde_json::json!({}))).unwrap();

        assert!(matches!(step.fail("late"), Err(CrewError::InvalidTransition(_))));
        assert!(matches!(step.skip(vec![]), Err(CrewError::InvalidTransition(_))));
        assert_eq!(step.status, StepStatus::Completed);
        assert!(step.errors.is_empty());
    }

    #[test]
    fn test_flow_ids_are_unique() {
        let a = generate_flow_id();
        let b = generate_flow_id();
        assert_ne!(a, b);
        assert!(a.starts_with("flow_"));
        assert_eq!(a.rsplit('_').next().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_run_step_records_success() {
        let mut tracker = FlowTracker::with_id("flow_test");
        let step = tracker
            .run_step("draft_generation", "Draft Generation", None, || async {
                Ok(StepOutcome::new(serde_json::json!({ "ok": true }))
                    .with_decisions(vec!["wrote it".to_string()])
                    .with_content_loss(ContentLoss::compute(10, 10)))
            })
            .await;

        assert_eq!(step.status, StepStatus::Completed);
        assert!(step.start_time.is_some() && step.end_time.is_some());
        assert!(step.start_time <= step.end_time);
        assert_eq!(step.agent_decisions, vec!["wrote it"]);
        assert_eq!(step.content_loss.unwrap().loss_percentage, 0.0);
    }

    #[tokio::test]
    async fn test_failed_step_does_not_stop_flow() {
        let mut tracker = FlowTracker::with_id("flow_test");
        tracker
            .run_step("research", "Research", None, || async {
                Err(CrewError::Timeout(Duration::from_millis(5)))
            })
            .await;
        tracker
            .run_step("draft_generation", "Draft Generation", None, || async {
                Ok(StepOutcome::new(serde_json::Value::Null))
            })
            .await;

        let record = tracker.finish();
        assert_eq!(record.steps.len(), 2);
        assert_eq!(record.steps[0].status, StepStatus::Failed);
        assert_eq!(record.steps[0].errors.len(), 1);
        assert!(record.steps[0].output.is_none());
        assert_eq!(record.steps[1].status, StepStatus::Completed);
        assert_eq!(record.status(), "failed");
    }

    #[tokio::test]
    async fn test_total_duration_ignores_skipped_steps() {
        let mut tracker = FlowTracker::with_id("flow_test");
        tracker.skip_step("research", "Research", vec!["original content".to_string()]);
        tracker
            .run_step("draft_generation", "Draft Generation", None, || async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(StepOutcome::new(serde_json::Value::Null))
            })
            .await;

        let record = tracker.finish();
        let skipped = record.step("research").unwrap();
        assert_eq!(skipped.status, StepStatus::Skipped);
        assert!(skipped.start_time.is_none());
        assert_eq!(skipped.elapsed_ms(), None);

        let drafted = record.step("draft_generation").unwrap().elapsed_ms().unwrap();
        assert_eq!(record.total_duration_ms, drafted);
        assert!(record.total_duration_ms >= 20.0);
        assert_eq!(record.status(), "completed");
    }
}
