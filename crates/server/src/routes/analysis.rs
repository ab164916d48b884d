use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use crew::{AnalyzePotentialRequest, PotentialAnalysis, analyze_potential};
use serde::Deserialize;
use ts_rs::TS;
use utils::content_dir::count_files;

use crate::{AppState, error::ApiError};

/// Legacy `analyze-content` body; every field is optional
#[derive(Debug, Default, Deserialize, TS)]
pub struct AnalyzeContentRequest {
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub use_flow: bool,
}

fn run_analysis(state: &AppState, request: AnalyzePotentialRequest) -> Result<PotentialAnalysis, ApiError> {
    let folder = request.folder.trim();
    if folder.is_empty() {
        return Err(ApiError::BadRequest("folder must not be empty".to_string()));
    }

    let files_count = state
        .content_root
        .as_deref()
        .map(|root| count_files(root, folder))
        .unwrap_or(0);

    Ok(analyze_potential(folder, files_count))
}

pub async fn analyze_content_potential(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzePotentialRequest>,
) -> Result<ResponseJson<PotentialAnalysis>, ApiError> {
    Ok(ResponseJson(run_analysis(&state, payload)?))
}

pub async fn analyze_content(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeContentRequest>,
) -> Result<ResponseJson<PotentialAnalysis>, ApiError> {
    let request = AnalyzePotentialRequest {
        folder: payload.folder.unwrap_or_default(),
        use_flow: payload.use_flow,
    };
    Ok(ResponseJson(run_analysis(&state, request)?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze-potential", post(analyze_content_potential))
        .route("/analyze-content", post(analyze_content))
}
