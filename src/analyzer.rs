//! Repository-level orchestration: discovery, fan-out, aggregation.

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::aggregate::{Aggregator, RepositoryAnalysis};
use crate::cache::CacheStore;
use crate::discover;
use crate::pool::WorkerPool;
use crate::task::TaskConfig;

/// Default per-file size ceiling: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".repo_cache";

/// Run configuration. Plain values only; workers clone what they need.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Worker count override; None follows CPU parallelism
    pub max_workers: Option<usize>,
    /// Per-file size ceiling in bytes
    pub max_file_size: u64,
    /// Where cache entries live
    pub cache_dir: PathBuf,
    /// Whether to consult and populate the cache
    pub use_cache: bool,
    /// Show a progress bar while the pool drains
    pub progress: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_workers: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            use_cache: true,
            progress: false,
        }
    }
}

/// Analyzes a repository tree into a `RepositoryAnalysis`.
pub struct RepositoryAnalyzer {
    config: AnalyzerConfig,
    cancel: Arc<AtomicBool>,
}

impl RepositoryAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_cancel_flag(config, Arc::new(AtomicBool::new(false)))
    }

    /// Create an analyzer driven by an externally owned cancel flag,
    /// e.g. one flipped by a signal handler.
    pub fn with_cancel_flag(config: AnalyzerConfig, cancel: Arc<AtomicBool>) -> Self {
        Self { config, cancel }
    }

    /// The cancel flag. Setting it stops new tasks from starting;
    /// already-running tasks finish and are reported normally.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Analyze the repository at `root`.
    ///
    /// Fatal only when the root does not exist. Every file-scoped
    /// problem is folded into the aggregate as a skip or an exclusion.
    pub fn analyze(
        &self,
        root: &Path,
        extra_excludes: &[String],
    ) -> anyhow::Result<RepositoryAnalysis> {
        let mut aggregator = Aggregator::new();

        info!(repository = %root.display(), "starting analysis");
        let files = discover::discover(root, extra_excludes, self.config.max_file_size)?;
        info!("found {} files to analyze", files.len());

        if files.is_empty() {
            return Ok(aggregator.finish());
        }

        let cache = CacheStore::new(&self.config.cache_dir, self.config.use_cache);
        cache.prepare();

        let task_config = TaskConfig {
            max_file_size: self.config.max_file_size,
            cache,
        };

        let bar = if self.config.progress {
            let bar = ProgressBar::new(files.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")
                    .expect("valid template")
                    .progress_chars("#>-"),
            );
            Some(bar)
        } else {
            None
        };

        let pool = WorkerPool::new(self.config.max_workers);
        let outcomes = pool.run(files, task_config, Arc::clone(&self.cancel))?;

        for (path, outcome) in outcomes {
            aggregator.observe(&path, outcome);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        if aggregator.failed() > 0 {
            info!("{} files failed and were excluded", aggregator.failed());
        }

        let result = aggregator.finish();
        info!(
            "analysis completed in {:.2}s ({} files)",
            result.processing_time, result.total_files
        );
        Ok(result)
    }
}
