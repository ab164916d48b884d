use axum::response::Json as ResponseJson;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
pub struct ServiceInfo {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Serialize, TS)]
pub struct HealthStatus {
    pub status: String,
    pub container: String,
}

pub async fn service_root() -> ResponseJson<ServiceInfo> {
    ResponseJson(ServiceInfo {
        status: "ok".to_string(),
        service: "ai-writing-flow".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn health_check() -> ResponseJson<HealthStatus> {
    ResponseJson(HealthStatus {
        status: "healthy".to_string(),
        container: "running".to_string(),
    })
}
