//! hydro-gof CLI

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hydro_gof::load::load_pair;

#[derive(Parser)]
#[command(name = "hydro-gof")]
#[command(about = "Goodness-of-fit statistics for observed vs. simulated series")]
#[command(version)]
struct Cli {
    /// Observed series, one value per line
    #[arg(short, long)]
    observed: PathBuf,

    /// Simulated (or measured) series, one value per line
    #[arg(short, long, visible_alias = "measured")]
    simulated: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Output file for the report. Defaults to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    /// `NAME: value` lines
    Text,
    /// Pretty-printed JSON object
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let pair = load_pair(&cli.observed, &cli.simulated).with_context(|| {
        format!(
            "loading {} and {}",
            cli.observed.display(),
            cli.simulated.display()
        )
    })?;
    tracing::info!(n = pair.len(), "comparing series");

    let report = pair.compare().context("computing goodness of fit")?;

    let rendered = match cli.format {
        ReportFormat::Text => report.to_string(),
        ReportFormat::Json => {
            let mut json = report.to_json_pretty()?;
            json.push('\n');
            json
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}
