//! Candidate file discovery.
//!
//! Walks the repository tree, pruning excluded directories before descent
//! so their contents are never visited, and keeps files whose extension
//! maps to a registered language and whose size is under the ceiling.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::languages;

/// Directory names pruned by default: VCS metadata, dependency and vendor
/// trees, build output, and virtual environments.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "vendor",
    "__pycache__",
    "build",
    "dist",
    "target",
    ".venv",
    "venv",
];

/// The only fatal discovery error: the root path is missing.
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("repository path does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("walking {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Collect candidate files under `root`.
///
/// `extra_excludes` extends the default excluded directory names. Files
/// over `max_file_size` bytes are dropped here; the analysis task
/// re-checks before parsing. Unreadable entries inside the tree are
/// skipped rather than failing the walk.
pub fn discover(
    root: &Path,
    extra_excludes: &[String],
    max_file_size: u64,
) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.exists() {
        return Err(DiscoverError::RootNotFound(root.to_path_buf()));
    }

    let mut excluded: HashSet<&str> = DEFAULT_EXCLUDED_DIRS.iter().copied().collect();
    excluded.extend(extra_excludes.iter().map(String::as_str));

    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| {
        let name = e.file_name().to_string_lossy();
        !(e.file_type().is_dir() && excluded.contains(name.as_ref()))
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Root errors are fatal; anything deeper is skipped
                if e.path() == Some(root) || e.depth() == 0 {
                    return Err(DiscoverError::Walk {
                        path: root.to_path_buf(),
                        source: e,
                    });
                }
                tracing::debug!("skipping unreadable entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if languages::language_for_path(entry.path()).is_none() {
            continue;
        }
        match entry.metadata() {
            Ok(meta) if meta.len() <= max_file_size => {
                files.push(entry.path().to_path_buf());
            }
            // Oversize or unreadable metadata: not a candidate, not an error
            _ => continue,
        }
    }

    Ok(files)
}
