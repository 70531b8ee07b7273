//! End-to-end analysis tests over real temporary repositories.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tempfile::TempDir;

use repolens::analyzer::{AnalyzerConfig, RepositoryAnalyzer};
use repolens::cache::CacheStore;
use repolens::pool::WorkerPool;
use repolens::task::{Outcome, TaskConfig};
use repolens::Aggregator;

fn analyzer(temp: &TempDir, use_cache: bool) -> RepositoryAnalyzer {
    repolens::init();
    RepositoryAnalyzer::new(AnalyzerConfig {
        max_workers: Some(2),
        cache_dir: temp.path().join(".repo_cache"),
        use_cache,
        progress: false,
        ..Default::default()
    })
}

#[test]
fn test_mixed_language_repository() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir(&repo).unwrap();

    fs::write(
        repo.join("a.py"),
        "import os\n\ndef main():\n    pass\n",
    )
    .unwrap();
    fs::write(
        repo.join("b.go"),
        "package main\n\nfunc main() {}\n\nfunc helper() {}\n",
    )
    .unwrap();

    let result = analyzer(&temp, false).analyze(&repo, &[]).unwrap();

    assert_eq!(result.total_files, 2);
    assert_eq!(result.total_functions, 3);
    assert_eq!(result.total_imports, 1);
    assert_eq!(
        result.languages_found.iter().collect::<Vec<_>>(),
        vec!["go", "python"]
    );

    // Per-file lists are sorted and deduplicated
    for file in &result.files {
        let mut sorted = file.functions.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(file.functions, sorted);
        let mut sorted = file.imports.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(file.imports, sorted);
    }
}

#[test]
fn test_empty_repository_yields_zero_aggregate() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir(&repo).unwrap();
    fs::write(repo.join("notes.txt"), "no source here\n").unwrap();

    let result = analyzer(&temp, false).analyze(&repo, &[]).unwrap();

    assert_eq!(result.total_files, 0);
    assert_eq!(result.total_functions, 0);
    assert_eq!(result.total_imports, 0);
    assert!(result.languages_found.is_empty());
    assert!(result.files.is_empty());
}

#[test]
fn test_excluded_directories_never_contribute() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir_all(repo.join(".git").join("hooks")).unwrap();
    fs::create_dir_all(repo.join("node_modules").join("lib")).unwrap();

    fs::write(repo.join(".git").join("hooks").join("hook.py"), "x = 1\n").unwrap();
    fs::write(
        repo.join("node_modules").join("lib").join("dep.js"),
        "var x = 1;\n",
    )
    .unwrap();
    fs::write(repo.join("app.py"), "def run():\n    pass\n").unwrap();

    let result = analyzer(&temp, false).analyze(&repo, &[]).unwrap();

    assert_eq!(result.total_files, 1);
    assert!(result.files[0].file_path.ends_with("app.py"));
}

#[test]
fn test_oversize_file_is_invisible() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir(&repo).unwrap();

    fs::write(repo.join("small.py"), "def f():\n    pass\n").unwrap();
    fs::write(repo.join("huge.py"), "# padding\n".repeat(100)).unwrap();

    repolens::init();
    let analyzer = RepositoryAnalyzer::new(AnalyzerConfig {
        max_workers: Some(2),
        max_file_size: 64,
        cache_dir: temp.path().join(".repo_cache"),
        use_cache: false,
        progress: false,
    });
    let result = analyzer.analyze(&repo, &[]).unwrap();

    assert_eq!(result.total_files, 1);
    assert!(result.files[0].file_path.ends_with("small.py"));
}

#[test]
fn test_cached_rerun_is_bit_identical() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir(&repo).unwrap();

    fs::write(
        repo.join("a.py"),
        "import sys\n\ndef one():\n    pass\n\ndef two():\n    pass\n",
    )
    .unwrap();
    fs::write(repo.join("b.go"), "package main\n\nfunc main() {}\n").unwrap();

    let first = analyzer(&temp, true).analyze(&repo, &[]).unwrap();
    let second = analyzer(&temp, true).analyze(&repo, &[]).unwrap();

    // Per-file results come back verbatim from the cache, durations included
    assert_eq!(first.files, second.files);
    assert_eq!(first.total_functions, second.total_functions);
    assert_eq!(first.total_imports, second.total_imports);
}

#[test]
fn test_modified_file_is_reanalyzed() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir(&repo).unwrap();
    let file = repo.join("a.py");

    fs::write(&file, "def before():\n    pass\n").unwrap();
    let first = analyzer(&temp, true).analyze(&repo, &[]).unwrap();
    assert_eq!(first.files[0].functions, vec!["before"]);

    fs::write(&file, "def after_rename():\n    pass\n").unwrap();
    let second = analyzer(&temp, true).analyze(&repo, &[]).unwrap();
    assert_eq!(second.files[0].functions, vec!["after_rename"]);
}

#[test]
fn test_corrupt_cache_entry_recovers() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir(&repo).unwrap();
    let file = repo.join("a.py");
    fs::write(&file, "def intact():\n    pass\n").unwrap();

    let cache_dir = temp.path().join(".repo_cache");
    analyzer(&temp, true).analyze(&repo, &[]).unwrap();

    // Clobber the stored entry for this fingerprint
    let digest = CacheStore::fingerprint(&file).unwrap();
    fs::write(cache_dir.join(format!("{digest}.json")), "{ corrupt").unwrap();

    let result = analyzer(&temp, true).analyze(&repo, &[]).unwrap();
    assert_eq!(result.total_files, 1);
    assert_eq!(result.files[0].functions, vec!["intact"]);
}

#[test]
fn test_one_failure_among_five_candidates() {
    let temp = TempDir::new().unwrap();
    repolens::init();

    let mut tasks: Vec<PathBuf> = Vec::new();
    for i in 0..4 {
        let path = temp.path().join(format!("ok{i}.py"));
        fs::write(&path, format!("def fn_{i}():\n    pass\n")).unwrap();
        tasks.push(path);
    }
    // Fifth candidate vanished between discovery and analysis
    tasks.push(temp.path().join("ghost.py"));

    let pool = WorkerPool::new(Some(3));
    let config = TaskConfig {
        max_file_size: 10 * 1024 * 1024,
        cache: CacheStore::new(temp.path().join(".repo_cache"), false),
    };
    let rx = pool
        .run(tasks, config, Arc::new(AtomicBool::new(false)))
        .unwrap();

    let mut aggregator = Aggregator::new();
    for (path, outcome) in rx {
        aggregator.observe(&path, outcome);
    }
    assert_eq!(aggregator.failed(), 1);

    let result = aggregator.finish();
    assert_eq!(result.total_files, 4);
    assert_eq!(result.total_functions, 4);
}

#[test]
fn test_missing_repository_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let err = analyzer(&temp, false).analyze(&missing, &[]).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_extra_exclude_flag() {
    let temp = TempDir::new().unwrap();
    let repo = temp.path().join("repo");
    fs::create_dir_all(repo.join("fixtures")).unwrap();
    fs::write(repo.join("fixtures").join("sample.py"), "x = 1\n").unwrap();
    fs::write(repo.join("real.py"), "def f():\n    pass\n").unwrap();

    let result = analyzer(&temp, false)
        .analyze(&repo, &["fixtures".to_string()])
        .unwrap();

    assert_eq!(result.total_files, 1);
    assert!(result.files[0].file_path.ends_with("real.py"));
}

#[test]
fn test_outcome_skip_does_not_appear_anywhere() {
    let temp = TempDir::new().unwrap();
    repolens::init();

    let big = temp.path().join("big.py");
    fs::write(&big, "x".repeat(1000)).unwrap();

    let config = TaskConfig {
        max_file_size: 10,
        cache: CacheStore::new(temp.path().join(".repo_cache"), false),
    };
    let outcome = repolens::task::run(&big, &config);
    assert!(matches!(outcome, Outcome::Skipped(_)));

    let mut aggregator = Aggregator::new();
    aggregator.observe(&big, outcome);
    let result = aggregator.finish();
    assert_eq!(result.total_files, 0);
}
