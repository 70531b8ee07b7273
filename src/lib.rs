//! Repolens - concurrent repository analyzer.
//!
//! Repolens walks a directory tree of source files, extracts declared
//! function/class/type names and import references per file with
//! tree-sitter, and folds everything into a repository-level summary.
//! Per-file results are cached by content fingerprint so unchanged
//! repositories re-analyze in near-zero time.
//!
//! # Architecture
//!
//! - `languages`: static per-language profiles (extensions + queries)
//! - `parser`: narrow capability interface over tree-sitter
//! - `discover`: candidate file discovery with directory pruning
//! - `cache`: fingerprint-keyed store of prior per-file results
//! - `task`: single-file analysis with explicit tri-state outcomes
//! - `pool`: bounded worker pool with warm per-worker capability caches
//! - `aggregate`: order-independent fold into the repository summary
//! - `analyzer`: orchestration of discovery, fan-out, and aggregation
//! - `report`: pretty and JSON output
//!
//! # Adding a New Language
//!
//! See `src/languages/` for examples. Add a module with the profile's
//! extensions and queries and register it in `languages/mod.rs`.

pub mod aggregate;
pub mod analyzer;
pub mod cache;
pub mod cli;
pub mod discover;
pub mod languages;
pub mod parser;
pub mod pool;
pub mod report;
pub mod task;

pub use aggregate::{Aggregator, RepositoryAnalysis};
pub use analyzer::{AnalyzerConfig, RepositoryAnalyzer};
pub use cache::CacheStore;
pub use discover::{discover, DiscoverError, DEFAULT_EXCLUDED_DIRS};
pub use languages::LanguageProfile;
pub use parser::{Capability, Extraction};
pub use pool::WorkerPool;
pub use task::{FileAnalysis, Outcome, SkipReason};

/// Initialize all subsystems.
///
/// Call this once at startup; registration is idempotent.
pub fn init() {
    languages::register_all();
}
