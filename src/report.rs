//! Output formatting for analysis results.
//!
//! Two surfaces:
//! - Pretty: human-readable summary and per-file detail on stdout
//! - JSON: `{summary, files}` report written to a path

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use colored::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::RepositoryAnalysis;
use crate::task::FileAnalysis;

/// JSON report root.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub summary: JsonSummary,
    pub files: Vec<FileAnalysis>,
}

/// Repository-level summary section of the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonSummary {
    pub repository: String,
    pub total_files: usize,
    pub total_functions: usize,
    pub total_imports: usize,
    pub languages_found: Vec<String>,
    pub processing_time: f64,
}

/// Build the JSON report structure for a finished run.
pub fn json_report(repository: &str, result: &RepositoryAnalysis) -> JsonReport {
    JsonReport {
        summary: JsonSummary {
            repository: repository.to_string(),
            total_files: result.total_files,
            total_functions: result.total_functions,
            total_imports: result.total_imports,
            languages_found: result.languages_found.iter().cloned().collect(),
            processing_time: result.processing_time,
        },
        files: result.files.clone(),
    }
}

/// Write the JSON report to `output`.
pub fn write_json(
    output: &Path,
    repository: &str,
    result: &RepositoryAnalysis,
) -> anyhow::Result<()> {
    let report = json_report(repository, result);
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(output, json)?;
    Ok(())
}

/// Print the repository summary, and per-file detail unless
/// `summary_only` is set.
pub fn write_pretty(repository: &str, result: &RepositoryAnalysis, summary_only: bool) {
    let rule = "=".repeat(60);

    println!("\n{rule}");
    println!("{}", "REPOSITORY ANALYSIS SUMMARY".bold());
    println!("{rule}");
    println!("Repository: {repository}");
    println!("Total files processed: {}", result.total_files);
    println!("Total functions found: {}", result.total_functions);
    println!("Total imports found: {}", result.total_imports);
    let languages = if result.languages_found.is_empty() {
        "None".to_string()
    } else {
        result
            .languages_found
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Languages detected: {languages}");
    println!("Processing time: {:.2} seconds", result.processing_time);
    if result.total_files > 0 {
        println!(
            "Average time per file: {:.4} seconds",
            result.processing_time / result.total_files as f64
        );
    }

    if summary_only || result.files.is_empty() {
        return;
    }

    println!("\n{rule}");
    println!("{}", "DETAILED RESULTS BY FILE".bold());
    println!("{rule}");

    let mut by_language: BTreeMap<&str, Vec<&FileAnalysis>> = BTreeMap::new();
    for file in &result.files {
        by_language.entry(&file.language).or_default().push(file);
    }

    for (language, files) in &by_language {
        println!("\n--- {} FILES ---", language.to_uppercase().cyan().bold());

        for file in files {
            println!("\nFile: {}", file.file_path);
            println!("  Size: {} bytes", file.file_size);
            println!("  Processing time: {:.4}s", file.processing_time);
            if !file.functions.is_empty() {
                println!(
                    "  Functions ({}): {}",
                    file.functions.len(),
                    preview(&file.functions)
                );
            }
            if !file.imports.is_empty() {
                println!(
                    "  Imports ({}): {}",
                    file.imports.len(),
                    preview(&file.imports)
                );
            }
        }
    }
}

/// First five names, comma-joined, with an ellipsis when truncated.
fn preview(names: &[String]) -> String {
    let head = names.iter().take(5).cloned().collect::<Vec<_>>().join(", ");
    if names.len() > 5 {
        format!("{head}...")
    } else {
        head
    }
}
