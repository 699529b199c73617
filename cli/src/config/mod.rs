//! # Deployment Configuration
//!
//! Built-in defaults describe the Waves marketing site. A `deploy.yaml` in the
//! site directory (or the file passed with `--config`) overrides individual
//! fields; anything it leaves out keeps its default.
//!
//! ```yaml
//! bucket: waves-static-seawater
//! distribution_id: E2EXAMPLE123
//! exclude_patterns:
//!   - "drafts/*"
//! ```

mod rules;
mod site;

pub use rules::{ContentMarker, ContentTypeRule};
pub use site::{SiteConfig, BASELINE_EXCLUDES};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Config file looked up in the site directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "deploy.yaml";

/// Load the site configuration.
///
/// An explicit path must exist. Without one, `{site_dir}/deploy.yaml` is used
/// if present, otherwise the built-in defaults.
pub fn load(site_dir: &Path, explicit: Option<&Path>) -> Result<SiteConfig> {
    let config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            load_from_file(path)?
        }
        None => {
            let path = site_dir.join(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_from_file(&path)?
            } else {
                debug!("No {} in {}, using defaults", DEFAULT_CONFIG_FILE, site_dir.display());
                SiteConfig::default()
            }
        }
    };

    validate(&config)?;
    Ok(config)
}

fn load_from_file(path: &Path) -> Result<SiteConfig> {
    info!("📄 Loading deployment config from {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse a YAML document into a config, filling defaults
pub fn parse(content: &str) -> Result<SiteConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(SiteConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        message: e.to_string(),
    })
}

/// Reject configs the sync could not run with
pub fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.bucket.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: "bucket".to_string(),
        });
    }

    for pattern in &config.exclude_patterns {
        glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_override_keeps_defaults() {
        let config = parse("bucket: waves-staging\ndistribution_id: E123\n").unwrap();
        assert_eq!(config.bucket, "waves-staging");
        assert_eq!(config.distribution(), Some("E123"));
        assert_eq!(config.required_files, SiteConfig::default().required_files);
        assert_eq!(config.content_types.len(), 3);
    }

    #[test]
    fn test_parse_empty_document() {
        let config = parse("").unwrap();
        assert_eq!(config.bucket, "waves-static-seawater");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse("bucket: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let config = SiteConfig {
            exclude_patterns: vec!["[unterminated".to_string()],
            ..SiteConfig::default()
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_bucket() {
        let config = SiteConfig {
            bucket: String::new(),
            ..SiteConfig::default()
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_load_uses_site_dir_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("deploy.yaml"), "bucket: from-file\n").unwrap();
        let config = load(dir.path(), None).unwrap();
        assert_eq!(config.bucket, "from-file");
    }

    #[test]
    fn test_load_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(dir.path(), None).unwrap();
        assert_eq!(config.bucket, "waves-static-seawater");
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(load(dir.path(), Some(&missing)).is_err());
    }
}
