//! Process command - extract accounts from a single disclosure file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use pensia_core::{FileResult, PensiaConfig, PensionExtractor};

use crate::table;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (XML or DAT)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail when any account balance disagrees with its components
    #[arg(long)]
    check: bool,
}

/// Output format options.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Flattened CSV table
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let extractor = PensionExtractor::with_config(config);
    let result = extractor.process_file(&args.input)?;

    let output = format_result(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    println!(
        "{} {} accounts extracted from {}",
        style("ℹ").blue(),
        result.accounts.len(),
        result.file
    );

    if args.check {
        check_balances(&result)?;
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load configuration from an explicit path, or defaults when none given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PensiaConfig> {
    match config_path {
        Some(path) => Ok(PensiaConfig::from_file(Path::new(path))?),
        None => Ok(PensiaConfig::default()),
    }
}

/// Render a result in the requested format.
pub fn format_result(result: &FileResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => table::to_csv(std::slice::from_ref(result)),
        OutputFormat::Text => Ok(table::to_text(result)),
    }
}

fn check_balances(result: &FileResult) -> anyhow::Result<()> {
    let mismatched: Vec<_> = result
        .accounts
        .iter()
        .filter(|a| a.balance_discrepancy != 0.0)
        .collect();

    if mismatched.is_empty() {
        return Ok(());
    }

    eprintln!("{}", style("Balance mismatches:").yellow());
    for account in &mismatched {
        eprintln!(
            "  - {}: balance {} vs components {}",
            account.account_number,
            table::format_amount(account.balance),
            table::format_amount(account.component_total)
        );
    }
    anyhow::bail!("{} accounts with balance mismatches", mismatched.len())
}
