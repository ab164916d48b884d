use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use serde::Serialize;
use ts_rs::TS;
use utils::content_dir::{ContentFolder, list_content_folders};

use crate::AppState;

#[derive(Debug, Serialize, TS)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ContentFolders {
    Ok {
        folders: Vec<ContentFolder>,
        total: usize,
    },
    Error {
        message: String,
        folders: Vec<ContentFolder>,
    },
}

impl ContentFolders {
    fn error(message: impl Into<String>) -> Self {
        ContentFolders::Error {
            message: message.into(),
            folders: Vec::new(),
        }
    }
}

/// Sub-directories of the raw content root; a missing root is a 200 error body
pub async fn list_folders(State(state): State<AppState>) -> ResponseJson<ContentFolders> {
    let Some(root) = state.content_root.as_deref() else {
        return ResponseJson(ContentFolders::error("CONTENT_RAW_DIR is not configured"));
    };

    match list_content_folders(root) {
        Ok(folders) => ResponseJson(ContentFolders::Ok {
            total: folders.len(),
            folders,
        }),
        Err(err) => {
            tracing::warn!("Failed to list content folders in {}: {}", root.display(), err);
            ResponseJson(ContentFolders::error(err.to_string()))
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/list-content-folders", get(list_folders))
}
