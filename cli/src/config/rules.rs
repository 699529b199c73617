//! Content-type corrections and marketing content markers.

use serde::{Deserialize, Serialize};

/// Content type forced onto a single object after the sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeRule {
    /// Object key relative to the bucket root (e.g. "css/marine-theme.css")
    pub key: String,

    /// Content-Type header value
    pub content_type: String,
}

impl ContentTypeRule {
    pub fn new(key: &str, content_type: &str) -> Self {
        Self {
            key: key.to_string(),
            content_type: content_type.to_string(),
        }
    }
}

pub(super) fn default_content_types() -> Vec<ContentTypeRule> {
    vec![
        ContentTypeRule::new("index.html", "text/html; charset=utf-8"),
        ContentTypeRule::new("css/marine-theme.css", "text/css; charset=utf-8"),
        ContentTypeRule::new("js/marine-app.js", "application/javascript; charset=utf-8"),
    ]
}

/// Literal text a file is expected to contain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMarker {
    pub file: String,
    pub content: String,
    pub description: String,
}

impl ContentMarker {
    pub fn new(file: &str, content: &str, description: &str) -> Self {
        Self {
            file: file.to_string(),
            content: content.to_string(),
            description: description.to_string(),
        }
    }
}

pub(super) fn default_content_markers() -> Vec<ContentMarker> {
    vec![
        ContentMarker::new(
            "index.html",
            "Amplify Your Navigation Tools",
            "AI amplification messaging",
        ),
        ContentMarker::new(
            "index.html",
            "Choose Your Navigation Experience",
            "Pricing section",
        ),
        ContentMarker::new(
            "index.html",
            "Open Source Navigation Intelligence",
            "GitHub integration",
        ),
        ContentMarker::new("css/marine-theme.css", "marine-", "Marine theme styles"),
        ContentMarker::new("js/marine-app.js", "WavesMarineApp", "Marine app functionality"),
    ]
}
