//! Command-line interface for repolens.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use crate::analyzer::{
    AnalyzerConfig, RepositoryAnalyzer, DEFAULT_CACHE_DIR, DEFAULT_MAX_FILE_SIZE,
};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Analyze a repository for functions, types, and imports.
///
/// Walks the repository tree, extracts declared names and import
/// references from every supported source file, and prints an aggregate
/// summary. Results are cached per file so unchanged repositories
/// re-analyze in near-zero time.
#[derive(Parser)]
#[command(name = "repolens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the repository to analyze
    pub repo_path: PathBuf,

    /// Output file for results (JSON format)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of worker threads
    #[arg(short = 'w', long)]
    pub max_workers: Option<usize>,

    /// Maximum file size to process in bytes
    #[arg(short = 's', long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Disable result caching
    #[arg(long)]
    pub no_cache: bool,

    /// Cache directory
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Additional directory names to exclude (repeatable)
    #[arg(long, value_name = "DIR")]
    pub exclude: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show only summary statistics
    #[arg(long)]
    pub summary_only: bool,
}

lazy_static::lazy_static! {
    /// Set by the SIGINT handler; wired into the run's cancel flag.
    static ref INTERRUPTED: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
}

#[cfg(unix)]
extern "C" fn handle_sigint(_: libc::c_int) {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

/// Install the interrupt handler. No-op on non-Unix platforms; the
/// cancel flag still exists but nothing sets it.
#[cfg(unix)]
fn install_interrupt_handler() {
    let handler = handle_sigint as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
fn install_interrupt_handler() {}

/// Run the analysis command.
pub fn run(args: &Cli) -> anyhow::Result<i32> {
    crate::init();
    install_interrupt_handler();

    let analyzer = RepositoryAnalyzer::with_cancel_flag(
        AnalyzerConfig {
            max_workers: args.max_workers,
            max_file_size: args.max_file_size,
            cache_dir: args.cache_dir.clone(),
            use_cache: !args.no_cache,
            progress: !args.summary_only,
        },
        Arc::clone(&INTERRUPTED),
    );

    let result = analyzer.analyze(&args.repo_path, &args.exclude)?;

    let repo = args.repo_path.to_string_lossy();

    if INTERRUPTED.load(Ordering::Relaxed) {
        eprintln!("\nAnalysis interrupted; reporting partial results");
    }

    report::write_pretty(&repo, &result, args.summary_only);

    if let Some(output) = &args.output {
        report::write_json(output, &repo, &result)?;
        println!("\nDetailed results saved to: {}", output.display());
    }

    Ok(EXIT_SUCCESS)
}
