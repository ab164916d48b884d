use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::get,
};
use crew::FlowExecutionRecord;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{AppState, error::ApiError};

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize, TS)]
pub struct DiagnosticsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, TS)]
pub struct RecentExecutions {
    /// Records currently held in the store, not the page size
    pub total: u64,
    pub executions: Vec<FlowExecutionRecord>,
}

pub async fn get_flow_diagnostics(
    State(state): State<AppState>,
    Path(flow_id): Path<String>,
) -> Result<ResponseJson<FlowExecutionRecord>, ApiError> {
    let record = state
        .flow
        .diagnostics(&flow_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Flow execution not found".to_string()))?;
    Ok(ResponseJson(record.as_ref().clone()))
}

/// Most recent records, newest first
pub async fn list_flow_diagnostics(
    State(state): State<AppState>,
    Query(query): Query<DiagnosticsQuery>,
) -> ResponseJson<RecentExecutions> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let store = state.flow.store();
    let executions: Vec<FlowExecutionRecord> = store
        .recent(limit)
        .await
        .into_iter()
        .map(|record| record.as_ref().clone())
        .collect();

    ResponseJson(RecentExecutions {
        total: store.len().await,
        executions,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/flow-diagnostics", get(list_flow_diagnostics))
        .route("/flow-diagnostics/{flow_id}", get(get_flow_diagnostics))
}
