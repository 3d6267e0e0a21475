//! Batch command - extract accounts from multiple disclosure files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, warn};

use pensia_core::{FileResult, PensionExtractor};

use crate::table;

use super::process::{OutputFormat, format_result, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files
    #[arg(required = true)]
    input: String,

    /// Directory for per-file outputs
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a flattened summary CSV across all files
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Keep going when a file fails to process
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of processing one file.
struct BatchEntry {
    path: PathBuf,
    result: Option<FileResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "xml" | "dat")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs)
        .build_global()
        .ok();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = PensionExtractor::with_config(config);

    let entries: Vec<BatchEntry> = files
        .par_iter()
        .map(|path| {
            let outcome = extractor.process_file(path);
            pb.inc(1);
            match outcome {
                Ok(result) => BatchEntry {
                    path: path.clone(),
                    result: Some(result),
                    error: None,
                },
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    BatchEntry {
                        path: path.clone(),
                        result: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    pb.finish_with_message("Complete");

    let failed: Vec<&BatchEntry> = entries.iter().filter(|e| e.error.is_some()).collect();

    if !args.continue_on_error {
        if let Some(entry) = failed.first() {
            anyhow::bail!(
                "Processing failed for {}: {}",
                entry.path.display(),
                entry.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if let Some(output_dir) = &args.output_dir {
        for entry in &entries {
            if let Some(result) = &entry.result {
                let output_path = per_file_output(output_dir, &entry.path, args.format);
                fs::write(&output_path, format_result(result, args.format)?)?;
                debug!("Wrote {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|dir| dir.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));
        let results: Vec<FileResult> = entries.iter().filter_map(|e| e.result.clone()).collect();
        fs::write(&summary_path, table::to_csv(&results)?)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let account_count: usize = entries
        .iter()
        .filter_map(|e| e.result.as_ref())
        .map(|r| r.accounts.len())
        .sum();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} accounts), {} failed",
        style(entries.len() - failed.len()).green(),
        account_count,
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for entry in &failed {
            println!(
                "  - {}: {}",
                entry.path.display(),
                entry.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn per_file_output(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("result");
    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };
    output_dir.join(format!("{}.{}", stem, extension))
}
