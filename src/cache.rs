//! Fingerprint-keyed cache of per-file analysis results.
//!
//! Entries live one-per-file in the cache directory, named by the
//! fingerprint digest. A fingerprint covers path, mtime, and size, so an
//! unchanged file hits the cache across runs while any touch or resize
//! invalidates it. Reads that fail for any reason are misses; writes are
//! best-effort. Independent workers may race on the same fingerprint, but
//! the written content is a deterministic function of the input file, so
//! last-writer-wins needs no locking.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::debug;

use crate::task::FileAnalysis;

/// File-backed store of prior analysis results.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    enabled: bool,
}

impl CacheStore {
    /// Create a store rooted at `dir`. When disabled, lookup and store
    /// are no-ops.
    pub fn new<P: Into<PathBuf>>(dir: P, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    /// Whether caching is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Create the cache directory if missing. Failure disables nothing;
    /// individual writes will fail and be logged instead.
    pub fn prepare(&self) {
        if self.enabled {
            if let Err(e) = fs::create_dir_all(&self.dir) {
                debug!(dir = %self.dir.display(), "cache dir creation failed: {e}");
            }
        }
    }

    /// Compute the fingerprint digest for a file.
    ///
    /// Derived from path, mtime (seconds and nanoseconds), and size -
    /// never from content. A same-size content change with a preserved
    /// mtime therefore returns a stale hit; this is the known weak spot
    /// of the invalidation policy.
    pub fn fingerprint(path: &Path) -> Option<String> {
        let meta = fs::metadata(path).ok()?;
        let mtime = meta.modified().ok()?;
        let age = mtime.duration_since(UNIX_EPOCH).ok()?;
        let key = format!(
            "{}:{}.{:09}:{}",
            path.display(),
            age.as_secs(),
            age.subsec_nanos(),
            meta.len()
        );
        Some(blake3::hash(key.as_bytes()).to_hex().to_string())
    }

    /// Look up the cached result for a file.
    ///
    /// Any failure - missing entry, unreadable file, malformed JSON - is
    /// a miss, never an error.
    pub fn lookup(&self, path: &Path) -> Option<FileAnalysis> {
        if !self.enabled {
            return None;
        }

        let entry = self.entry_path(path)?;
        let bytes = fs::read(&entry).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                debug!(file = %path.display(), "cache entry unreadable, re-analyzing: {e}");
                None
            }
        }
    }

    /// Persist a fresh result. Failures are logged and swallowed; the
    /// caller already holds the computed result.
    pub fn store(&self, path: &Path, analysis: &FileAnalysis) {
        if !self.enabled {
            return;
        }

        let Some(entry) = self.entry_path(path) else {
            return;
        };
        let json = match serde_json::to_vec_pretty(analysis) {
            Ok(json) => json,
            Err(e) => {
                debug!(file = %path.display(), "cache serialization failed: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&entry, json) {
            debug!(file = %path.display(), "cache write failed: {e}");
        }
    }

    fn entry_path(&self, path: &Path) -> Option<PathBuf> {
        let digest = Self::fingerprint(path)?;
        Some(self.dir.join(format!("{digest}.json")))
    }
}
