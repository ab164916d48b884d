//! In-process completion provider for tests

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;

use crate::brain::{ChatRequest, LLMProviderTrait, ProviderError, ProviderResponse, ProviderType};

/// One scripted reaction to a chat call
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    Fail(String),
    /// Sleep, then reply with an empty completion
    Stall(Duration),
}

impl Script {
    pub fn reply(text: impl Into<String>) -> Self {
        Script::Reply(text.into())
    }
}

/// Plays queued scripts in order, then repeats `fallback` forever
#[derive(Clone)]
pub struct ScriptedProvider {
    queue: Arc<Mutex<VecDeque<Script>>>,
    fallback: Script,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedProvider {
    pub fn new(fallback: Script) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn then(self, script: Script) -> Self {
        self.queue.lock().unwrap().push_back(script);
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProviderTrait for ScriptedProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Compatible
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn chat(&self, request: ChatRequest) -> Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        let script = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match script {
            Script::Reply(text) => Ok(ProviderResponse {
                content: text,
                model: Some("scripted-model".to_string()),
                usage: None,
            }),
            Script::Fail(message) => Err(ProviderError::ApiError {
                status: 500,
                message,
            }),
            Script::Stall(delay) => {
                tokio::time::sleep(delay).await;
                Ok(ProviderResponse::text(""))
            }
        }
    }
}
