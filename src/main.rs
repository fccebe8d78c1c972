use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::PipelineConfig;
use crate::domain::Pipeline;
use crate::export::ExportFormat;
use crate::report::{console, MarketSummary, OutlierReport};

mod config;
mod db;
mod domain;
mod errors;
mod export;
mod ingest;
mod report;
mod spreadsheets;

#[cfg(test)]
mod tests;

/// Clean scraped real-estate listings and export the valid rows.
#[derive(Parser, Debug)]
#[command(name = "listing_cleaner", version, about)]
struct Cli {
    /// Raw listings table (.csv or .json)
    #[arg(long)]
    input: PathBuf,

    /// Output formats; repeat the flag for several
    #[arg(long = "format", value_enum, default_values_t = vec![ExportFormat::Csv])]
    formats: Vec<ExportFormat>,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// TOML file overriding the built-in constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Area of one lot in m²
    #[arg(long)]
    lot_area: Option<f64>,

    /// Print the price-per-m² outlier report
    #[arg(long)]
    outliers: bool,

    /// Report only, write nothing
    #[arg(long)]
    no_export: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // 1️⃣ Configuration
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(lot) = cli.lot_area {
        config.lot_area_sqm = lot;
    }
    let target_rate = config.target_valid_rate;
    let pipeline = Pipeline::new(config).context("invalid configuration")?;

    // 2️⃣ Load and clean
    let raw = ingest::read_table(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let (rows, run) = pipeline.run(&raw, Local::now().date_naive());

    // 3️⃣ Filter and report
    let total = rows.len();
    let (valid, invalid) = report::partition(rows);
    tracing::info!("🧹 {} valid rows, {} dropped", valid.len(), invalid.len());

    let summary = MarketSummary::compute(&valid, total);
    console::print_summary(&summary, &run, target_rate);
    if cli.outliers {
        match OutlierReport::compute(&valid) {
            Some(report) => console::print_outliers(&report),
            None => tracing::warn!("Not enough valid rows for an outlier report"),
        }
    }

    // 4️⃣ Export
    if cli.no_export {
        return Ok(());
    }
    if valid.is_empty() {
        tracing::warn!("No valid rows, nothing to export");
        return Ok(());
    }
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let records = export::to_records(&valid, pipeline.config());
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    for format in dedup(&cli.formats) {
        export::export(format, &records, &summary, &cli.out_dir, &stamp)
            .with_context(|| format!("{} export failed", format.extension()))?;
    }

    Ok(())
}

fn dedup(formats: &[ExportFormat]) -> Vec<ExportFormat> {
    let mut out = Vec::with_capacity(formats.len());
    for f in formats {
        if !out.contains(f) {
            out.push(*f);
        }
    }
    out
}
