use chrono::Local;
use serde::{Deserialize, Serialize};

use super::image::GenerationRequest;

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One past successful generation. Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: String,
    pub prompt: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub palette: Option<String>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    /// Display-formatted local time.
    pub created_at: String,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>, request: &GenerationRequest) -> Self {
        Self {
            url: url.into(),
            prompt: request.prompt.clone(),
            style: request.style.clone(),
            palette: request.palette.clone(),
            aspect_ratio: request.aspect_ratio.clone(),
            created_at: Local::now().format(CREATED_AT_FORMAT).to_string(),
        }
    }
}
