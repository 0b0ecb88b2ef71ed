//! Ingest - merge the per-league exports into the canonical dataset.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use transfer_history::config::AppConfig;
use transfer_history::data::IngestPipeline;
use transfer_history::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Normalize raw transfer CSVs into one canonical dataset")]
struct Args {
    /// Config file (defaults to ./transfers.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the raw per-league CSV files
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Canonical output file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Drop rows whose age is out of range (`--drop-invalid-age=false` turns it off)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    drop_invalid_age: Option<bool>,

    /// Write season_start/season_end as YYYY-01-01 dates
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    season_as_date: Option<bool>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .ingest;
    if let Some(input_dir) = args.input_dir {
        config.input_dir = input_dir;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(drop_invalid_age) = args.drop_invalid_age {
        config.drop_invalid_age = drop_invalid_age;
    }
    if let Some(season_as_date) = args.season_as_date {
        config.coerce_season_to_date = season_as_date;
    }

    let report = IngestPipeline::from_config(&config)
        .run()
        .with_context(|| format!("Ingestion from '{}' failed", config.input_dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Read {} rows from {} files, wrote {} rows to {} ({} dropped)",
            report.input_rows,
            report.files.len(),
            report.output_rows,
            report.output_path.display(),
            report.dropped_rows
        );
    }

    Ok(())
}
