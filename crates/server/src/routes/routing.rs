use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use crew::{ContentRequest, RoutingResult};

use crate::{AppState, error::ApiError};

pub async fn test_routing(
    State(state): State<AppState>,
    Json(payload): Json<ContentRequest>,
) -> Result<ResponseJson<RoutingResult>, ApiError> {
    payload.validate()?;
    Ok(ResponseJson(state.flow.route(&payload)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/test-routing", post(test_routing))
}
