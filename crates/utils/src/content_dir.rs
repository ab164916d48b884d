//! Raw content directory helpers
//!
//! Content lives as one sub-directory per topic under a single root:
//! ```text
//! raw/
//! ├── ai-automation-guide/
//! │   ├── notes.md
//! │   └── links.txt
//! └── personal-adhd-story/
//! ```

use std::{
    env, fs, io,
    path::{Component, Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

const CONTENT_RAW_DIR_ENV: &str = "CONTENT_RAW_DIR";
const RAW_CONTENT_KIND: &str = "raw_content";

/// Raw content root from `CONTENT_RAW_DIR`, if configured
pub fn content_root_from_env() -> Option<PathBuf> {
    match env::var(CONTENT_RAW_DIR_ENV) {
        Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ContentFolder {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Sub-directories of `root`, sorted by name
pub fn list_content_folders(root: &Path) -> io::Result<Vec<ContentFolder>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Content path does not exist: {}", root.display()),
        ));
    }

    let mut folders = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        folders.push(ContentFolder {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().display().to_string(),
            kind: RAW_CONTENT_KIND.to_string(),
        });
    }

    folders.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(folders)
}

/// `folder` must be a single plain path segment
fn is_plain_segment(folder: &str) -> bool {
    let mut components = Path::new(folder).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Number of entries directly inside `root/folder`; 0 when it is missing
pub fn count_files(root: &Path, folder: &str) -> usize {
    if !is_plain_segment(folder) {
        tracing::warn!("Refusing to count files for folder '{}'", folder);
        return 0;
    }

    match fs::read_dir(root.join(folder)) {
        Ok(entries) => entries.filter_map(Result::ok).count(),
        Err(_) => 0,
    }
}
