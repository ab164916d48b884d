pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::{path::PathBuf, sync::Arc};

use crew::{CrewConfig, WritingFlow};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8003;

/// Shared state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<WritingFlow>,
    pub content_root: Option<PathBuf>,
}

impl AppState {
    pub fn new(flow: WritingFlow, content_root: Option<PathBuf>) -> Self {
        Self {
            flow: Arc::new(flow),
            content_root,
        }
    }
}

/// Server settings read once at start-up
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub crew: CrewConfig,
    pub content_root: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("BACKEND_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            crew: CrewConfig::from_env(),
            content_root: utils::content_dir::content_root_from_env(),
        }
    }
}
