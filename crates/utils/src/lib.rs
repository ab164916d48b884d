pub mod content_dir;
pub mod response;
