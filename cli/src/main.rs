//! Batch Runner
//!
//! Plays many auto-piloted runs and prints the percentile report.

use clap::{Parser, ValueEnum};
use collection_sim_core::batch::{compare_presets, run_batch, BatchConfig, BatchReport};
use std::process::ExitCode;

/// Collection simulator batch runner
#[derive(Parser, Debug)]
#[command(name = "collection-sim")]
#[command(about = "Run batches of collector auto-play and report outcome percentiles")]
struct Args {
    /// Number of runs
    #[arg(long, short = 'n', default_value_t = 200)]
    runs: usize,

    /// Week cap per run
    #[arg(long, default_value_t = 104)]
    max_weeks: u32,

    /// Base seed; run i uses seed + i * 1000003
    #[arg(long, default_value_t = 42)]
    seed: u32,

    /// Market preset: balanced, hot, cold, volatile
    #[arg(long, default_value = "balanced")]
    market: String,

    /// Weekly top-up preset: none, modest, steady, generous
    #[arg(long, default_value = "none")]
    top_up: String,

    /// Tuning preset: standard, easy, hard
    #[arg(long, default_value = "standard")]
    tuning: String,

    /// Never accept curator loans
    #[arg(long)]
    no_loans: bool,

    /// Flip surplus pieces at auction
    #[arg(long)]
    flip: bool,

    /// Run the batch once per market preset
    #[arg(long)]
    compare_presets: bool,

    /// Single-threaded execution
    #[arg(long)]
    sequential: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl Args {
    fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            runs: self.runs,
            max_weeks: self.max_weeks,
            base_seed: self.seed,
            market: self.market.clone(),
            top_up: self.top_up.clone(),
            tuning: self.tuning.clone(),
            loans_enabled: !self.no_loans,
            flipping_enabled: self.flip,
            sequential: self.sequential,
        }
    }
}

fn print_reports(reports: &[BatchReport], format: Format) -> Result<(), String> {
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(reports).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
        Format::Text => {
            for report in reports {
                println!("{}", report);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let batch = args.batch_config();
    let reports = if args.compare_presets {
        compare_presets(&batch)
    } else {
        run_batch(&batch).map(|report| vec![report])
    };

    let result = reports
        .map_err(|e| e.to_string())
        .and_then(|reports| print_reports(&reports, args.format));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "batch failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
