use anyhow::{Context, Result};
use graphql_codemod_config::CodemodConfig;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into
const SKIPPED_DIRS: &[&str] = &["node_modules", "__generated__"];

/// Collect the files to transform.
///
/// Files named explicitly are taken as-is. Directories are walked in file
/// name order, keeping files with a configured extension that match no
/// ignore pattern.
#[tracing::instrument(skip_all, fields(paths = paths.len()))]
pub fn collect_files(paths: &[PathBuf], config: &CodemodConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Cannot access {}", path.display()))?;
        if metadata.is_file() {
            files.push(path.clone());
            continue;
        }

        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            if !config.has_supported_extension(file) || is_ignored(config, path, file) {
                tracing::trace!(file = %file.display(), "Skipping file");
                continue;
            }
            files.push(file.to_path_buf());
        }
    }

    files.dedup();
    tracing::debug!(files = files.len(), "Collected files");
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Match ignore patterns against the path relative to the walked root as well
/// as the path as walked.
fn is_ignored(config: &CodemodConfig, root: &Path, file: &Path) -> bool {
    config.is_ignored(file)
        || file
            .strip_prefix(root)
            .is_ok_and(|relative| config.is_ignored(relative))
}
