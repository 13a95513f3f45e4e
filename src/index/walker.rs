//! Filesystem traversal feeding the index store.
//!
//! Depth-first recursive descent over the configured roots. Each visited
//! directory becomes exactly one persisted batch (folder row + retained file
//! names); excluded directories are skipped with their whole subtree.

use crate::config::Config;
use crate::index::exclude::ExclusionFilter;
use crate::index::store::IndexStore;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Rebuild the index from the configured root folders
pub fn rebuild(config: &Config, db_path: &Path) -> Result<()> {
    rebuild_with_progress(config, db_path, false)
}

/// Rebuild the index with optional silent mode
pub fn rebuild_with_progress(config: &Config, db_path: &Path, silent: bool) -> Result<()> {
    let exclusions = ExclusionFilter::new(&config.excluded_folders, &config.excluded_files)?;
    let mut store = IndexStore::open(db_path)?;
    store.begin_rebuild()?;

    let spinner = if !silent {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message("Indexing...");
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Some(spinner)
    } else {
        None
    };

    let mut session = RebuildSession::new(&mut store, &exclusions, spinner.as_ref());
    for root in &config.included_folders {
        session.walk_root(root)?;
    }

    let folder_count = session.folder_count;
    let file_count = session.file_count;

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!(
            "Indexed {folder_count} folders, {file_count} files"
        ));
    }
    info!(folders = folder_count, files = file_count, "rebuild complete");

    Ok(())
}

/// Traversal state for one rebuild.
///
/// Owns the folder-id counter and borrows the store and exclusion rules for
/// the duration of the walk; no state survives the rebuild call.
struct RebuildSession<'a> {
    store: &'a mut IndexStore,
    exclusions: &'a ExclusionFilter,
    progress: Option<&'a ProgressBar>,
    next_folder_id: i64,
    folder_count: u64,
    file_count: u64,
}

impl<'a> RebuildSession<'a> {
    fn new(
        store: &'a mut IndexStore,
        exclusions: &'a ExclusionFilter,
        progress: Option<&'a ProgressBar>,
    ) -> Self {
        Self {
            store,
            exclusions,
            progress,
            next_folder_id: 1,
            folder_count: 0,
            file_count: 0,
        }
    }

    /// Walk one configured root, normalized to carry no trailing slash
    fn walk_root(&mut self, root: &str) -> Result<()> {
        self.walk_dir(normalize_root(root))
    }

    /// Visit `dir` and its subtree.
    ///
    /// Subdirectories recurse before the current directory's own file batch
    /// is flushed; the folder id is assigned on entry, not at flush time.
    fn walk_dir(&mut self, dir: &str) -> Result<()> {
        if self.exclusions.is_folder_excluded(dir) {
            return Ok(());
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                // Tolerated partial failure: unreadable directories are
                // dropped from the generation, siblings continue
                debug!(dir, "skipping unreadable directory");
                return Ok(());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to list directory: {dir}"));
            }
        };

        let folder_id = self.next_folder_id;
        self.next_folder_id += 1;

        let mut file_names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read entry in: {dir}"))?;
            let file_type = entry
                .file_type()
                .with_context(|| format!("Failed to stat entry in: {dir}"))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if file_type.is_dir() {
                self.walk_dir(&join_path(dir, &name))?;
            } else {
                // Symlinks are never followed; anything that is not a
                // directory is recorded as a file
                if !self.exclusions.is_file_excluded(&name) {
                    file_names.push(name);
                }
            }
        }

        self.folder_count += 1;
        self.file_count += file_names.len() as u64;
        self.store.persist_directory(folder_id, dir, &file_names)?;

        if let Some(pb) = self.progress {
            pb.set_message(format!(
                "{} folders, {} files",
                self.folder_count, self.file_count
            ));
        }

        Ok(())
    }
}

/// Trim trailing slashes from a configured root; a bare `/` stays `/`
fn normalize_root(root: &str) -> &str {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Join a directory path and a child name with a single separator
fn join_path(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}
