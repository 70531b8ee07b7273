//! Single-file analysis.
//!
//! `run` turns one path into an explicit tri-state outcome. Everything
//! file-scoped is recovered here: unsupported or oversize files skip,
//! read and parse problems fail the file, and only the aggregate decides
//! what that means for the run.

use std::fs;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::pool;

/// Analysis of one source file. Name lists are sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub file_path: String,
    pub language: String,
    pub functions: Vec<String>,
    pub imports: Vec<String>,
    pub file_size: u64,
    pub processing_time: f64,
}

/// Why a file was skipped. Skips are not errors and are never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No registered language claims the extension
    UnknownLanguage,
    /// Size exceeds the configured ceiling
    FileTooLarge,
    /// The worker's capability load for this language failed earlier
    LanguageUnavailable,
    /// The run was interrupted before this task started
    Interrupted,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UnknownLanguage => "unknown language",
            SkipReason::FileTooLarge => "file too large",
            SkipReason::LanguageUnavailable => "language unavailable",
            SkipReason::Interrupted => "interrupted",
        }
    }
}

/// The tri-state result of analyzing one file.
#[derive(Debug, Clone)]
pub enum Outcome {
    Done(FileAnalysis),
    Skipped(SkipReason),
    Failed(String),
}

/// Plain-data inputs for a task. Clones of this cross into workers;
/// capability handles never do - each worker loads its own.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    pub max_file_size: u64,
    pub cache: CacheStore,
}

/// Analyze one file.
///
/// Consults the cache first; a hit short-circuits to the stored result
/// verbatim. On a miss the file is read, parsed through the calling
/// worker's warm capability, and the fresh result is cached best-effort.
/// The measured duration covers only the fresh-analysis path.
pub fn run(path: &Path, config: &TaskConfig) -> Outcome {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            warn!(file = %path.display(), "could not stat file: {e}");
            return Outcome::Failed(format!("stat failed: {e}"));
        }
    };
    if meta.len() > config.max_file_size {
        return Outcome::Skipped(SkipReason::FileTooLarge);
    }

    let Some(language) = crate::languages::language_for_path(path) else {
        return Outcome::Skipped(SkipReason::UnknownLanguage);
    };

    if let Some(hit) = config.cache.lookup(path) {
        debug!(file = %path.display(), "cache hit");
        return Outcome::Done(hit);
    }

    let started = Instant::now();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(file = %path.display(), "could not read file: {e}");
            return Outcome::Failed(format!("read failed: {e}"));
        }
    };

    let Some(capability) = pool::worker_capability(language) else {
        return Outcome::Skipped(SkipReason::LanguageUnavailable);
    };

    let extraction = match capability.extract(&bytes) {
        Ok(extraction) => extraction,
        Err(e) => {
            warn!(file = %path.display(), language, "parse failed: {e}");
            return Outcome::Failed(format!("parse failed: {e}"));
        }
    };

    let analysis = FileAnalysis {
        file_path: path.display().to_string(),
        language: language.to_string(),
        functions: extraction.functions,
        imports: extraction.imports,
        file_size: bytes.len() as u64,
        processing_time: started.elapsed().as_secs_f64(),
    };

    config.cache.store(path, &analysis);

    Outcome::Done(analysis)
}
