use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;

/// Compiled exclusion rules applied during a rebuild.
///
/// Folder patterns are shell-style globs matched against the full directory
/// path: `*` matches within one path component, `**` crosses components.
/// File exclusions are exact base-name matches, no patterns.
pub struct ExclusionFilter {
    folders: GlobSet,
    files: HashSet<String>,
}

impl ExclusionFilter {
    /// Compile the configured exclusion lists.
    ///
    /// Fails on the first malformed folder pattern so a bad configuration is
    /// reported before any traversal starts.
    pub fn new(folder_patterns: &[String], file_names: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in folder_patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .with_context(|| format!("Invalid folder exclusion pattern: {pattern}"))?;
            builder.add(glob);
        }
        let folders = builder
            .build()
            .context("Failed to compile folder exclusion patterns")?;

        Ok(Self {
            folders,
            files: file_names.iter().cloned().collect(),
        })
    }

    /// True if the directory at `path` matches any folder exclusion pattern
    pub fn is_folder_excluded(&self, path: &str) -> bool {
        self.folders.is_match(Path::new(path))
    }

    /// True if `name` exactly equals a configured excluded file name
    pub fn is_file_excluded(&self, name: &str) -> bool {
        self.files.contains(name)
    }
}
