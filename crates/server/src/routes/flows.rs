use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use crew::{ContentRequest, FlowReport, TrackedFlowSummary};

use crate::{AppState, error::ApiError};

pub async fn execute_flow(
    State(state): State<AppState>,
    Json(payload): Json<ContentRequest>,
) -> Result<ResponseJson<FlowReport>, ApiError> {
    payload.validate()?;
    let report = state.flow.execute(&payload).await?;
    Ok(ResponseJson(report))
}

/// Invalid input is not rejected here; it fails the recorded validation step
pub async fn execute_flow_tracked(
    State(state): State<AppState>,
    Json(payload): Json<ContentRequest>,
) -> Result<ResponseJson<TrackedFlowSummary>, ApiError> {
    let summary = state.flow.execute_tracked(&payload).await?;
    Ok(ResponseJson(summary))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/execute-flow", post(execute_flow))
        .route("/execute-flow-tracked", post(execute_flow_tracked))
}
