use axum::{Router, middleware, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, middleware::request_id_middleware};

pub mod analysis;
pub mod content;
pub mod diagnostics;
pub mod drafts;
pub mod flows;
pub mod health;
pub mod research;
pub mod routing;
pub mod verify;


pub fn router(state: AppState) -> Router {
    let base_routes = Router::new()
        .merge(routing::router())
        .merge(research::router())
        .merge(drafts::router())
        .merge(flows::router())
        .merge(diagnostics::router())
        .merge(analysis::router())
        .merge(content::router())
        .merge(verify::router())
        .with_state(state);

    Router::new()
        .route("/", get(health::service_root))
        .route("/health", get(health::health_check))
        .nest("/api", base_routes)
        // request_id runs outside the trace layer so its span is the parent
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}
