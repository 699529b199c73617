//! Site deployment configuration: bucket, distribution, file lists.

use serde::{Deserialize, Serialize};

use super::rules::{default_content_markers, default_content_types, ContentMarker, ContentTypeRule};

/// Exclusions that are always passed to the sync command.
///
/// Editor, VCS and package-manager artifacts and the deploy config itself
/// must never reach the bucket, so config overrides can add patterns but
/// never drop these.
pub const BASELINE_EXCLUDES: &[&str] = &[
    "node_modules/*",
    ".git/*",
    "*.md",
    "package*.json",
    "*.log",
    ".claude/*",
    "deploy*.yaml",
    "deploy*.yml",
];

/// Deployment configuration for the marketing site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Target S3 bucket name
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// CloudFront distribution to invalidate after sync (skipped when unset)
    #[serde(default)]
    pub distribution_id: Option<String>,

    /// Files that must exist locally before anything is uploaded
    #[serde(default = "default_required_files")]
    pub required_files: Vec<String>,

    /// Glob patterns excluded from the sync
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Per-object content-type corrections applied after the sync
    #[serde(default = "default_content_types")]
    pub content_types: Vec<ContentTypeRule>,

    /// Marketing content expected by `--validate`
    #[serde(default = "default_content_markers")]
    pub content_markers: Vec<ContentMarker>,

    /// Public URL of the production site
    #[serde(default = "default_production_url")]
    pub production_url: String,
}

fn default_bucket() -> String {
    "waves-static-seawater".to_string()
}

fn default_required_files() -> Vec<String> {
    [
        "index.html",
        "css/marine-theme.css",
        "js/marine-app.js",
        "about.html",
        "features.html",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_exclude_patterns() -> Vec<String> {
    [
        "node_modules/*",
        ".git/*",
        "*.md",
        "package*.json",
        "next.config.js",
        "tsconfig.json",
        "deploy*.js",
        "deploy*.sh",
        "*.log",
        ".claude/*",
        "deploy*.yaml",
        "deploy*.yml",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_production_url() -> String {
    "https://waves.seawater.io".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
            distribution_id: None,
            required_files: default_required_files(),
            exclude_patterns: default_exclude_patterns(),
            content_types: default_content_types(),
            content_markers: default_content_markers(),
            production_url: default_production_url(),
        }
    }
}

impl SiteConfig {
    /// Exclude patterns actually passed to the sync: baseline first, then
    /// configured patterns, without duplicates.
    pub fn effective_excludes(&self) -> Vec<String> {
        let mut excludes: Vec<String> = BASELINE_EXCLUDES.iter().map(|s| s.to_string()).collect();
        for pattern in &self.exclude_patterns {
            if !excludes.contains(pattern) {
                excludes.push(pattern.clone());
            }
        }
        excludes
    }

    /// Distribution id, treating an empty string as unset
    pub fn distribution(&self) -> Option<&str> {
        self.distribution_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn bucket_uri(&self) -> String {
        format!("s3://{}", self.bucket)
    }

    /// S3 static website endpoint for a region
    pub fn website_url(&self, region: &str) -> String {
        format!("http://{}.s3-website-{}.amazonaws.com", self.bucket, region)
    }
}
