use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use crew::Verification;

use crate::AppState;

pub async fn verify_openai(State(state): State<AppState>) -> ResponseJson<Verification> {
    ResponseJson(state.flow.verify().await)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/verify-openai", get(verify_openai))
}
