//! App wiring for route tests

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use crew::{
    ChatRequest, CrewConfig, LLMProviderTrait, ProviderError, ProviderResponse, ProviderType,
    WritingFlow,
};
use tower::ServiceExt;

use crate::{AppState, routes};

/// Answers every completion with the same text, or the same error
pub struct CannedProvider {
    reply: Result<String, String>,
}

impl CannedProvider {
    pub fn reply(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl LLMProviderTrait for CannedProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Compatible
    }

    fn name(&self) -> &'static str {
        "Canned"
    }

    fn is_configured(&self) -> bool {
        self.reply.is_ok()
    }

    async fn chat(&self, _request: ChatRequest) -> Result<ProviderResponse, ProviderError> {
        match &self.reply {
            Ok(text) => Ok(ProviderResponse {
                content: text.clone(),
                model: Some("canned-model".to_string()),
                usage: None,
            }),
            Err(message) => Err(ProviderError::AuthError(message.clone())),
        }
    }
}

pub fn app(provider: CannedProvider, content_root: Option<PathBuf>) -> Router {
    let flow = WritingFlow::with_seed(Arc::new(provider), CrewConfig::default(), 7);
    routes::router(AppState::new(flow, content_root))
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
