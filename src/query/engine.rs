//! Search term interpretation and execution against the index store.
//!
//! A term containing `*` is a glob matched against the reconstructed full
//! path; any other term is a substring matched against file names and folder
//! paths independently.

use crate::index::store::IndexStore;
use anyhow::{Result, anyhow, bail};
use std::collections::{HashMap, HashSet};

/// Execute all search terms and return one globally sorted path list.
///
/// Per-term results concatenate in term order (no deduplication), then the
/// combined list gets a single case-insensitive lexicographic sort.
pub fn search(store: &IndexStore, terms: &[String]) -> Result<Vec<String>> {
    let mut output = Vec::new();

    for term in terms {
        if term.contains('*') {
            output.extend(glob_term(store, term)?);
        } else {
            output.extend(plain_term(store, term)?);
        }
    }

    output.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    Ok(output)
}

/// Run a glob term against the reconstructed full paths.
///
/// Each `*` becomes the storage engine's wildcard; recursive `**` globs are
/// rejected outright.
fn glob_term(store: &IndexStore, term: &str) -> Result<Vec<String>> {
    if term.contains("**") {
        bail!("Recursive glob `**` is not supported in search terms: {term}");
    }
    store.full_path_glob(&term.replace('*', "%"))
}

/// Run a plain term: file-name hits (resolved to full paths through one
/// batched folder lookup) followed by folder-path hits.
fn plain_term(store: &IndexStore, term: &str) -> Result<Vec<String>> {
    let files = store.files_by_name_substring(term)?;

    let ids: HashSet<i64> = files.iter().map(|f| f.folder_id).collect();
    let folders_by_id: HashMap<i64, String> = store
        .folders_by_ids(&ids)?
        .into_iter()
        .map(|f| (f.id, f.path))
        .collect();

    let mut output = Vec::with_capacity(files.len());
    for file in &files {
        let folder_path = folders_by_id.get(&file.folder_id).ok_or_else(|| {
            anyhow!(
                "Index corruption: no folder row with id {} for file {:?}",
                file.folder_id,
                file.name
            )
        })?;
        output.push(format!("{}/{}", folder_path, file.name));
    }

    output.extend(store.folders_by_path_substring(term)?);
    Ok(output)
}
