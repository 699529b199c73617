//! Content checks run against the local site before upload
//!
//! Marker and SEO checks back `--validate`; the HTML basics check runs on
//! every deploy. Only a missing marker file is fatal, everything else is
//! reported as a warning.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

use crate::config::ContentMarker;
use crate::error::DeployError;

/// Outcome of a single advisory check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Passed(String),
    Warning(String),
}

impl Finding {
    pub fn is_warning(&self) -> bool {
        matches!(self, Finding::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Finding::Passed(m) | Finding::Warning(m) => m,
        }
    }
}

/// Check that each marker's file contains its literal text
///
/// # Errors
///
/// Returns [`DeployError::MissingFile`] for the first marker whose file does
/// not exist.
pub fn check_content_markers(site_dir: &Path, markers: &[ContentMarker]) -> Result<Vec<Finding>> {
    let mut findings = Vec::with_capacity(markers.len());

    for marker in markers {
        let path = site_dir.join(&marker.file);
        if !path.exists() {
            return Err(DeployError::MissingFile {
                path: marker.file.clone(),
            }
            .into());
        }

        let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes);

        if content.contains(&marker.content) {
            findings.push(Finding::Passed(format!(
                "{} found in {}",
                marker.description, marker.file
            )));
        } else {
            findings.push(Finding::Warning(format!(
                "{} missing from {}",
                marker.description, marker.file
            )));
        }
    }

    Ok(findings)
}

const SEO_CHECKS: &[(&str, &str)] = &[
    (r"<title>.*Waves.*</title>", "Page title with Waves"),
    (r#"<meta name="description""#, "Meta description"),
    (r#"<meta property="og:"#, "Open Graph tags"),
    (r"application/ld\+json", "Schema.org structured data"),
];

/// SEO elements expected on the landing page
pub fn check_seo(html: &str) -> Result<Vec<Finding>> {
    let mut findings = Vec::with_capacity(SEO_CHECKS.len());

    for (pattern, name) in SEO_CHECKS {
        let re = Regex::new(pattern).with_context(|| format!("Invalid SEO pattern {}", pattern))?;
        if re.is_match(html) {
            findings.push(Finding::Passed(format!("{} present", name)));
        } else {
            findings.push(Finding::Warning(format!("{} missing or incomplete", name)));
        }
    }

    Ok(findings)
}

/// Doctype, title and Flowbite presence; only failures are reported
pub fn check_html_basics(html: &str) -> Vec<Finding> {
    let mut warnings = Vec::new();

    if !html.contains("<!DOCTYPE html>") {
        warnings.push(Finding::Warning("HTML5 doctype missing".to_string()));
    }
    if !html.contains("<title>") {
        warnings.push(Finding::Warning("Page title missing".to_string()));
    }
    if !html.contains("Flowbite") {
        warnings.push(Finding::Warning(
            "Flowbite integration might be missing".to_string(),
        ));
    }

    warnings
}
