//! Aggregation of task outcomes into the repository-level summary.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::task::{FileAnalysis, Outcome};

/// Repository-level analysis summary.
///
/// Totals are exact sums over `files`; `languages_found` renders sorted
/// by virtue of being a BTreeSet. `files` is sorted by path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    pub total_files: usize,
    pub total_functions: usize,
    pub total_imports: usize,
    pub languages_found: BTreeSet<String>,
    pub processing_time: f64,
    pub files: Vec<FileAnalysis>,
}

impl RepositoryAnalysis {
    /// The zero-value aggregate for an empty candidate list.
    pub fn empty(elapsed: f64) -> Self {
        Self {
            total_files: 0,
            total_functions: 0,
            total_imports: 0,
            languages_found: BTreeSet::new(),
            processing_time: elapsed,
            files: Vec::new(),
        }
    }
}

/// Folds outcomes as they arrive, in any order.
///
/// Skipped outcomes contribute nothing; failed outcomes are logged and
/// excluded from every count. The fold is order-independent - only the
/// final sort by path fixes presentation order.
pub struct Aggregator {
    started: Instant,
    files: Vec<FileAnalysis>,
    languages: BTreeSet<String>,
    skipped: usize,
    failed: usize,
}

impl Aggregator {
    /// Start aggregating; the wall clock for the run starts here.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            files: Vec::new(),
            languages: BTreeSet::new(),
            skipped: 0,
            failed: 0,
        }
    }

    /// Fold in one completed outcome.
    pub fn observe(&mut self, path: &Path, outcome: Outcome) {
        match outcome {
            Outcome::Done(analysis) => {
                self.languages.insert(analysis.language.clone());
                self.files.push(analysis);
            }
            Outcome::Skipped(reason) => {
                debug!(file = %path.display(), "skipped: {}", reason.as_str());
                self.skipped += 1;
            }
            Outcome::Failed(cause) => {
                error!(file = %path.display(), "analysis failed: {cause}");
                self.failed += 1;
            }
        }
    }

    /// Files skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Files failed so far.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Finish the fold: sort by path, compute exact totals, stamp the
    /// elapsed wall-clock time.
    pub fn finish(mut self) -> RepositoryAnalysis {
        self.files.sort_by(|a, b| a.file_path.cmp(&b.file_path));

        let total_functions = self.files.iter().map(|f| f.functions.len()).sum();
        let total_imports = self.files.iter().map(|f| f.imports.len()).sum();

        RepositoryAnalysis {
            total_files: self.files.len(),
            total_functions,
            total_imports,
            languages_found: self.languages,
            processing_time: self.started.elapsed().as_secs_f64(),
            files: self.files,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
