//! Local preview of which files a sync will publish.

use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Compiled exclude list with `aws s3 sync` semantics: patterns match the
/// path relative to the site root and `*` spans directory separators.
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern {}", p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_excluded(&self, relative: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(relative))
    }

    /// A directory is pruned when everything beneath it would be excluded
    fn prunes_dir(&self, relative: &str) -> bool {
        self.is_excluded(&format!("{}/", relative))
    }
}

/// Files under `site_dir` that survive the exclude list, as relative paths
/// with forward slashes, sorted.
pub fn publishable_files(site_dir: &Path, excludes: &ExcludeSet) -> Result<Vec<String>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(site_dir).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        match relative_path(site_dir, entry.path()) {
            Some(rel) => !excludes.prunes_dir(&rel),
            None => true,
        }
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", site_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(rel) = relative_path(site_dir, entry.path()) {
            if !excludes.is_excluded(&rel) {
                files.push(rel);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// `path` relative to `root` when it lies inside it, resolving symlinks
/// where both exist
pub fn path_within(root: &Path, path: &Path) -> Option<String> {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    relative_path(&root, &path)
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel: PathBuf = path.strip_prefix(root).ok()?.to_path_buf();
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
