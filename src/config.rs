//! Tunable constants for the cleaning pipeline.
//!
//! Everything the heuristics depend on lives here so one code path can be
//! pointed at another market by swapping a TOML file:
//!
//! ```toml
//! lot_area_sqm = 500.0
//! price_floor = 50000.0
//!
//! [[land_bands]]
//! below = 2000000.0
//! lots = 0.25
//!
//! [[neighborhoods]]
//! name = "bè-kpota"
//! variants = ["be kpota"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::domain::gazetteer::{default_lome_entries, GazetteerEntry};
use crate::errors::{CleanerError, Result};

/// One step of the land price → area step function.
/// A price strictly below `below` maps to `lots` standard plots.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LandBand {
    pub below: f64,
    pub lots: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HouseAreas {
    pub small_below: f64,
    pub medium_below: f64,
    pub small_sqm: f64,
    pub medium_sqm: f64,
    pub large_sqm: f64,
    /// Used when no price is known.
    pub default_sqm: f64,
}

impl Default for HouseAreas {
    fn default() -> Self {
        Self {
            small_below: 15_000_000.0,
            medium_below: 25_000_000.0,
            small_sqm: 100.0,
            medium_sqm: 200.0,
            large_sqm: 400.0,
            default_sqm: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApartmentAreas {
    /// Studio and F1.
    pub studio_sqm: f64,
    pub f2_sqm: f64,
    pub f3_sqm: f64,
    pub f4_sqm: f64,
    pub default_sqm: f64,
}

impl Default for ApartmentAreas {
    fn default() -> Self {
        Self {
            studio_sqm: 35.0,
            f2_sqm: 50.0,
            f3_sqm: 70.0,
            f4_sqm: 90.0,
            default_sqm: 60.0,
        }
    }
}

/// Pipeline configuration. Built once at startup, shared read-only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Area of one standard land lot.
    pub lot_area_sqm: f64,
    /// Prices strictly between zero and this value are noise.
    pub price_floor: f64,
    /// Conservative price per square meter for land estimates.
    pub land_price_per_sqm: f64,
    pub default_city: String,
    pub source_label: String,

    /// Must ascend in both `below` and `lots`.
    pub land_bands: Vec<LandBand>,
    /// Lots for prices above every band.
    pub land_top_lots: f64,
    /// Lots for land listings with no price.
    pub land_default_lots: f64,

    pub house: HouseAreas,
    pub apartment: ApartmentAreas,

    pub fallback_min_sqm: f64,
    pub fallback_max_sqm: f64,

    /// Valid-row percentage the console report measures against.
    pub target_valid_rate: f64,

    pub neighborhoods: Vec<GazetteerEntry>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lot_area_sqm: 350.0,
            price_floor: 10_000.0,
            land_price_per_sqm: 20_000.0,
            default_city: "Lomé".to_string(),
            source_label: "Facebook Marketplace".to_string(),
            land_bands: vec![
                LandBand { below: 1_100_000.0, lots: 0.125 },
                LandBand { below: 2_100_000.0, lots: 0.25 },
                LandBand { below: 5_000_000.0, lots: 0.5 },
                LandBand { below: 11_000_000.0, lots: 1.0 },
            ],
            land_top_lots: 2.0,
            land_default_lots: 0.25,
            house: HouseAreas::default(),
            apartment: ApartmentAreas::default(),
            fallback_min_sqm: 20.0,
            fallback_max_sqm: 5000.0,
            target_valid_rate: 60.0,
            neighborhoods: default_lome_entries(),
        }
    }
}

impl PipelineConfig {
    /// Read a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: PipelineConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let house = &self.house;
        let apartment = &self.apartment;
        let mut positive = vec![
            ("lot_area_sqm", self.lot_area_sqm),
            ("price_floor", self.price_floor),
            ("land_price_per_sqm", self.land_price_per_sqm),
            ("land_top_lots", self.land_top_lots),
            ("land_default_lots", self.land_default_lots),
            ("fallback_min_sqm", self.fallback_min_sqm),
            ("fallback_max_sqm", self.fallback_max_sqm),
            ("house.small_below", house.small_below),
            ("house.medium_below", house.medium_below),
            ("house.small_sqm", house.small_sqm),
            ("house.medium_sqm", house.medium_sqm),
            ("house.large_sqm", house.large_sqm),
            ("house.default_sqm", house.default_sqm),
            ("apartment.studio_sqm", apartment.studio_sqm),
            ("apartment.f2_sqm", apartment.f2_sqm),
            ("apartment.f3_sqm", apartment.f3_sqm),
            ("apartment.f4_sqm", apartment.f4_sqm),
            ("apartment.default_sqm", apartment.default_sqm),
        ];
        for band in &self.land_bands {
            positive.push(("land_bands.below", band.below));
            positive.push(("land_bands.lots", band.lots));
        }
        // NaN fails every comparison, so test finiteness explicitly.
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CleanerError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.target_valid_rate) {
            return Err(CleanerError::Config(format!(
                "target_valid_rate must be a percentage, got {}",
                self.target_valid_rate
            )));
        }

        if self.fallback_max_sqm < self.fallback_min_sqm {
            return Err(CleanerError::Config(
                "fallback_max_sqm is below fallback_min_sqm".into(),
            ));
        }

        let mut prev: Option<LandBand> = None;
        for band in &self.land_bands {
            if let Some(p) = prev {
                if band.below <= p.below {
                    return Err(CleanerError::Config(format!(
                        "land band thresholds must ascend ({} after {})",
                        band.below, p.below
                    )));
                }
                if band.lots < p.lots {
                    return Err(CleanerError::Config(format!(
                        "land band below {} yields fewer lots than the band before it",
                        band.below
                    )));
                }
            }
            prev = Some(*band);
        }
        if let Some(last) = prev {
            if self.land_top_lots < last.lots {
                return Err(CleanerError::Config(
                    "land_top_lots is smaller than the last band".into(),
                ));
            }
        }

        if house.medium_below < house.small_below {
            return Err(CleanerError::Config(
                "house.medium_below is below house.small_below".into(),
            ));
        }
        if house.medium_sqm < house.small_sqm || house.large_sqm < house.medium_sqm {
            return Err(CleanerError::Config(
                "house tier areas must not shrink as price grows".into(),
            ));
        }

        if self.neighborhoods.is_empty() {
            return Err(CleanerError::Config("neighborhood list is empty".into()));
        }

        Ok(())
    }
}
