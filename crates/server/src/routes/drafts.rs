use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use crew::{DraftOutcome, GenerateDraftRequest};

use crate::{AppState, error::ApiError};

pub async fn generate_draft(
    State(state): State<AppState>,
    Json(payload): Json<GenerateDraftRequest>,
) -> Result<ResponseJson<DraftOutcome>, ApiError> {
    payload.content.validate()?;
    Ok(ResponseJson(state.flow.generate_draft(&payload).await))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/generate-draft", post(generate_draft))
}
