use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use crew::{ResearchOutcome, ResearchRequest};

use crate::{AppState, error::ApiError};

/// Completion failures come back as `200 {status:"error"}`
pub async fn research(
    State(state): State<AppState>,
    Json(payload): Json<ResearchRequest>,
) -> Result<ResponseJson<ResearchOutcome>, ApiError> {
    if payload.topic.trim().is_empty() {
        return Err(ApiError::BadRequest("topic must not be empty".to_string()));
    }
    Ok(ResponseJson(state.flow.research(&payload).await))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/research", post(research))
}
