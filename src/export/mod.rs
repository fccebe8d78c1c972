//! Sinks for the cleaned, valid rows.
//!
//! Every sink writes the same seventeen columns in the same order; the
//! core only decides the schema, each sink owns its encoding.

pub mod csv;
pub mod json;
pub mod sql;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::db::{save_listings, Database};
use crate::domain::NormalizedListing;
use crate::errors::Result;
use crate::report::MarketSummary;
use crate::spreadsheets::export_listings_xlsx;

pub const COLUMNS: [&str; 17] = [
    "id",
    "title",
    "property_type",
    "offer_type",
    "city",
    "neighborhood",
    "area_sqm",
    "price_amount",
    "price_per_sqm",
    "latitude",
    "longitude",
    "source",
    "publication_date",
    "collected_date",
    "source_url",
    "photo_url",
    "status",
];

const FILE_PREFIX: &str = "listings_clean";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Excel,
    Json,
    Sql,
    Sqlite,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Json => "json",
            ExportFormat::Sql => "sql",
            ExportFormat::Sqlite => "sqlite",
        }
    }
}

/// One output row. Field order is the column order.
/// Coordinates and publication date are not collected yet and stay null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub id: String,
    pub title: String,
    pub property_type: String,
    pub offer_type: String,
    pub city: String,
    pub neighborhood: String,
    pub area_sqm: Option<f64>,
    pub price_amount: Option<f64>,
    pub price_per_sqm: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub source: String,
    pub publication_date: Option<String>,
    pub collected_date: String,
    pub source_url: String,
    pub photo_url: String,
    pub status: String,
}

/// A single typed value, for sinks that write cell by cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Null,
}

impl ExportRecord {
    pub fn from_listing(listing: &NormalizedListing, source_label: &str) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            property_type: listing.property_type.as_str().to_string(),
            offer_type: listing.offer_type.as_str().to_string(),
            city: listing.city.clone(),
            neighborhood: listing.neighborhood.clone(),
            area_sqm: listing.area_sqm,
            price_amount: listing.price_amount,
            price_per_sqm: listing.price_per_sqm,
            latitude: None,
            longitude: None,
            source: source_label.to_string(),
            publication_date: None,
            collected_date: listing.collected_date.format("%Y-%m-%d").to_string(),
            source_url: listing.source_url.clone(),
            photo_url: listing.photo_url.clone(),
            status: listing.status.as_str().to_string(),
        }
    }

    /// Values in `COLUMNS` order.
    pub fn cells(&self) -> [Cell; 17] {
        let text = |s: &str| Cell::Text(s.to_string());
        let num = |v: Option<f64>| v.map(Cell::Number).unwrap_or(Cell::Null);
        [
            text(&self.id),
            text(&self.title),
            text(&self.property_type),
            text(&self.offer_type),
            text(&self.city),
            text(&self.neighborhood),
            num(self.area_sqm),
            num(self.price_amount),
            num(self.price_per_sqm),
            num(self.latitude),
            num(self.longitude),
            text(&self.source),
            self.publication_date.as_deref().map(text).unwrap_or(Cell::Null),
            text(&self.collected_date),
            text(&self.source_url),
            text(&self.photo_url),
            text(&self.status),
        ]
    }
}

pub fn to_records(valid: &[NormalizedListing], config: &PipelineConfig) -> Vec<ExportRecord> {
    valid
        .iter()
        .map(|l| ExportRecord::from_listing(l, &config.source_label))
        .collect()
}

pub fn output_path(out_dir: &Path, format: ExportFormat, stamp: &str) -> PathBuf {
    out_dir.join(format!("{FILE_PREFIX}_{stamp}.{}", format.extension()))
}

/// Write one format and return where it went.
pub fn export(
    format: ExportFormat,
    records: &[ExportRecord],
    summary: &MarketSummary,
    out_dir: &Path,
    stamp: &str,
) -> Result<PathBuf> {
    let path = output_path(out_dir, format, stamp);
    match format {
        ExportFormat::Csv => self::csv::write_csv(records, &path)?,
        ExportFormat::Json => self::json::write_json(records, &path)?,
        ExportFormat::Sql => self::sql::write_sql_script(records, &path)?,
        ExportFormat::Excel => export_listings_xlsx(records, summary, &path)?,
        ExportFormat::Sqlite => {
            let db = Database::new(&path);
            db.init()?;
            save_listings(&db, records)?;
        }
    }
    tracing::info!("✅ {} export: {}", format.extension().to_uppercase(), path.display());
    Ok(path)
}
