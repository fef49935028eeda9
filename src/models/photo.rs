use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Record of one successful still capture
///
/// Owned by the flow for the lifetime of the Preview route; the file is
/// removed on retake unless the user marked it saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CapturedPhoto {
    pub path: PathBuf,
    pub taken_at: DateTime<Local>,
}

impl CapturedPhoto {
    pub fn new(path: PathBuf, taken_at: DateTime<Local>) -> Self {
        Self { path, taken_at }
    }

    /// File name component, when the path has one
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}
