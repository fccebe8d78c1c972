// src/domain/pipeline.rs

use chrono::NaiveDate;

use crate::config::PipelineConfig;
use crate::domain::extract::{
    classify_offer_type, classify_property_type, extract_area, extract_price,
};
use crate::domain::gazetteer::{Gazetteer, UNSPECIFIED};
use crate::domain::inference::infer_area;
use crate::domain::listing::{price_per_sqm, NormalizedListing};
use crate::domain::logic::{derive_city, derive_status, synthesize_title};
use crate::errors::Result;
use crate::ingest::models::{self, RawListing};

/// Counters gathered while cleaning, for the run log and the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub rows: usize,
    pub prices_resolved: usize,
    pub areas_from_title: usize,
    pub areas_inferred: usize,
    pub neighborhoods_matched: usize,
}

/// How one listing's area was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaSource {
    Title,
    Inferred,
    Missing,
}

/// Cleaning pipeline. Holds the configuration and the gazetteer built
/// from it; both stay read-only for the whole batch.
pub struct Pipeline {
    config: PipelineConfig,
    gazetteer: Gazetteer,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let gazetteer = Gazetteer::new(&config.neighborhoods);
        tracing::debug!("gazetteer ready with {} localities", gazetteer.len());
        Ok(Self { config, gazetteer })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clean every row. Output order matches input order; every row comes
    /// out, valid or not, so filtering stays a separate step.
    pub fn run(
        &self,
        rows: &[RawListing],
        collected: NaiveDate,
    ) -> (Vec<NormalizedListing>, RunStats) {
        let mut stats = RunStats {
            rows: rows.len(),
            ..RunStats::default()
        };

        let listings: Vec<NormalizedListing> = rows
            .iter()
            .map(|raw| {
                let (listing, source) = self.normalize_with_source(raw, collected);
                if listing.price_amount.is_some() {
                    stats.prices_resolved += 1;
                }
                match source {
                    AreaSource::Title => stats.areas_from_title += 1,
                    AreaSource::Inferred => stats.areas_inferred += 1,
                    AreaSource::Missing => {}
                }
                if listing.neighborhood != UNSPECIFIED {
                    stats.neighborhoods_matched += 1;
                }
                listing
            })
            .collect();

        tracing::info!(
            "💰 prices resolved: {}/{}",
            stats.prices_resolved,
            stats.rows
        );
        tracing::info!(
            "📏 surfaces: {} from titles, {} inferred ({}/{} total)",
            stats.areas_from_title,
            stats.areas_inferred,
            stats.areas_from_title + stats.areas_inferred,
            stats.rows
        );
        tracing::info!(
            "📍 neighborhoods identified: {}/{}",
            stats.neighborhoods_matched,
            stats.rows
        );

        (listings, stats)
    }

    pub fn normalize(&self, raw: &RawListing, collected: NaiveDate) -> NormalizedListing {
        self.normalize_with_source(raw, collected).0
    }

    fn normalize_with_source(
        &self,
        raw: &RawListing,
        collected: NaiveDate,
    ) -> (NormalizedListing, AreaSource) {
        let config = &self.config;

        let title = synthesize_title(raw);
        let property_type = classify_property_type(&title);
        let offer_type = classify_offer_type(&title);
        let neighborhood = self.gazetteer.match_title(&title);

        let title_area = extract_area(&title, config.lot_area_sqm);
        let price_amount = extract_price(raw, &title, title_area, property_type, config);

        let (area_sqm, source) = match title_area {
            Some(area) => (Some(area), AreaSource::Title),
            None => match infer_area(&title, price_amount, config) {
                Some(inferred) => {
                    tracing::debug!(
                        "inferred {} m² for {:?} via {:?}",
                        inferred.area_sqm,
                        title,
                        inferred.rule
                    );
                    (Some(inferred.area_sqm), AreaSource::Inferred)
                }
                None => (None, AreaSource::Missing),
            },
        };

        let listing = NormalizedListing {
            id: raw.text(models::ID).unwrap_or_default(),
            title,
            property_type,
            offer_type,
            city: derive_city(raw, &config.default_city),
            neighborhood,
            area_sqm,
            price_amount,
            price_per_sqm: price_per_sqm(price_amount, area_sqm),
            status: derive_status(raw),
            source_url: raw.text(models::LISTING_URL).unwrap_or_default(),
            photo_url: raw.text(models::PHOTO_URL).unwrap_or_default(),
            collected_date: collected,
        };

        (listing, source)
    }
}
