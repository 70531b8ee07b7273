//! Worker pool and per-worker capability caches.
//!
//! Tasks fan out across a bounded rayon pool and stream their outcomes
//! back over a channel in completion order. Each worker thread owns a
//! warm cache of loaded capabilities: the first file of a language on a
//! worker pays the grammar/query load cost, later files reuse it, and a
//! load failure is cached as a permanent negative so it is never retried
//! on that worker. Nothing in the warm cache is shared across workers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use rayon::prelude::*;
use tracing::{error, warn};

use crate::languages;
use crate::parser::Capability;
use crate::task::{self, Outcome, SkipReason, TaskConfig};

thread_local! {
    /// Warm per-worker capability cache. None records a failed load.
    static CAPABILITIES: RefCell<HashMap<&'static str, Option<Rc<Capability>>>> =
        RefCell::new(HashMap::new());
}

/// Get the calling worker's capability for a language, loading it on
/// first use. Returns None if this worker has already failed to load it.
pub(crate) fn worker_capability(language: &'static str) -> Option<Rc<Capability>> {
    CAPABILITIES.with(|cache| {
        let mut cache = cache.borrow_mut();
        cache
            .entry(language)
            .or_insert_with(|| match languages::profile(language) {
                Some(profile) => match Capability::load(&profile) {
                    Ok(capability) => Some(Rc::new(capability)),
                    Err(e) => {
                        warn!(language, "worker failed to load language: {e}");
                        None
                    }
                },
                None => None,
            })
            .clone()
    })
}

/// Distributes analysis tasks across up to `workers` parallel workers.
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create a pool. With no override the size follows available CPU
    /// parallelism, capped at 32.
    pub fn new(max_workers: Option<usize>) -> Self {
        let workers = max_workers
            .unwrap_or_else(|| (num_cpus::get() + 4).min(32))
            .max(1);
        Self { workers }
    }

    /// The number of workers this pool runs.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run every task, streaming `(path, outcome)` pairs as they
    /// complete. Completion order is unspecified; consumers must be
    /// order-independent.
    ///
    /// A panic inside one task is caught and reported as `Failed` for
    /// that path without disturbing sibling tasks. Once `cancel` is set,
    /// tasks that have not started yield `Skipped` instead.
    pub fn run(
        &self,
        tasks: Vec<PathBuf>,
        config: TaskConfig,
        cancel: Arc<AtomicBool>,
    ) -> anyhow::Result<mpsc::Receiver<(PathBuf, Outcome)>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("repolens-worker-{i}"))
            .build()?;

        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            pool.install(|| {
                tasks.into_par_iter().for_each_with(tx, |tx, path| {
                    let outcome = if cancel.load(Ordering::Relaxed) {
                        Outcome::Skipped(SkipReason::Interrupted)
                    } else {
                        match catch_unwind(AssertUnwindSafe(|| task::run(&path, &config))) {
                            Ok(outcome) => outcome,
                            Err(panic) => {
                                let cause = describe_panic(panic);
                                error!(file = %path.display(), "worker panicked: {cause}");
                                Outcome::Failed(format!("worker panicked: {cause}"))
                            }
                        }
                    };
                    // Receiver gone means the consumer gave up; drop quietly
                    let _ = tx.send((path, outcome));
                });
            });
        });

        Ok(rx)
    }
}

fn describe_panic(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
