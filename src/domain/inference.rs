//! Best-effort surface estimates for listings whose title gave no area.
//!
//! These are priors, not measurements. They trade precision for a higher
//! share of rows that can carry a price per square meter.

use crate::config::PipelineConfig;
use crate::domain::extract::{
    contains_any, APARTMENT_KEYWORDS, HOUSE_KEYWORDS, LAND_KEYWORDS, VILLA_KEYWORDS,
};
use crate::domain::gazetteer::normalize;

/// Which prior produced an inferred area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceRule {
    LandByPrice,
    LandDefault,
    HouseByPrice,
    HouseDefault,
    ApartmentByUnit,
    ApartmentDefault,
    PriceFallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferredArea {
    pub area_sqm: f64,
    pub rule: InferenceRule,
}

/// Estimate a surface from the title's category and the resolved price.
/// `price` is expected to have passed the price floor already.
pub fn infer_area(
    title: &str,
    price: Option<f64>,
    config: &PipelineConfig,
) -> Option<InferredArea> {
    let t = normalize(title);
    let price = price.filter(|p| *p > 0.0);

    let (area_sqm, rule) = if contains_any(&t, LAND_KEYWORDS) {
        land_area(price, config)
    } else if contains_any(&t, VILLA_KEYWORDS) || contains_any(&t, HOUSE_KEYWORDS) {
        house_area(price, config)
    } else if contains_any(&t, APARTMENT_KEYWORDS) {
        apartment_area(&t, config)
    } else {
        let p = price.filter(|p| *p >= config.price_floor)?;
        // max/min rather than clamp: never panics on a bad bound
        let area = (p / config.land_price_per_sqm)
            .max(config.fallback_min_sqm)
            .min(config.fallback_max_sqm);
        (area, InferenceRule::PriceFallback)
    };

    Some(InferredArea { area_sqm, rule })
}

/// Price bands map to a number of standard lots; bands ascend in both.
fn land_area(price: Option<f64>, config: &PipelineConfig) -> (f64, InferenceRule) {
    let lot = config.lot_area_sqm;
    match price {
        Some(p) => {
            let lots = config
                .land_bands
                .iter()
                .find(|band| p < band.below)
                .map(|band| band.lots)
                .unwrap_or(config.land_top_lots);
            (lots * lot, InferenceRule::LandByPrice)
        }
        None => (config.land_default_lots * lot, InferenceRule::LandDefault),
    }
}

fn house_area(price: Option<f64>, config: &PipelineConfig) -> (f64, InferenceRule) {
    let h = &config.house;
    match price {
        Some(p) if p < h.small_below => (h.small_sqm, InferenceRule::HouseByPrice),
        Some(p) if p < h.medium_below => (h.medium_sqm, InferenceRule::HouseByPrice),
        Some(_) => (h.large_sqm, InferenceRule::HouseByPrice),
        None => (h.default_sqm, InferenceRule::HouseDefault),
    }
}

fn apartment_area(normalized: &str, config: &PipelineConfig) -> (f64, InferenceRule) {
    let a = &config.apartment;
    let by_unit: [(&[&str], f64); 4] = [
        (&["f1", "studio"], a.studio_sqm),
        (&["f2"], a.f2_sqm),
        (&["f3"], a.f3_sqm),
        (&["f4"], a.f4_sqm),
    ];
    by_unit
        .iter()
        .find(|(tokens, _)| contains_any(normalized, tokens))
        .map(|(_, sqm)| (*sqm, InferenceRule::ApartmentByUnit))
        .unwrap_or((a.default_sqm, InferenceRule::ApartmentDefault))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(title: &str, price: Option<f64>) -> Option<f64> {
        infer_area(title, price, &PipelineConfig::default()).map(|i| i.area_sqm)
    }

    #[test]
    fn land_bands_follow_price() {
        assert_eq!(area("Terrain Agoè", Some(800_000.0)), Some(43.75));
        assert_eq!(area("Terrain Agoè", Some(1_500_000.0)), Some(87.5));
        assert_eq!(area("Terrain Agoè", Some(3_000_000.0)), Some(175.0));
        assert_eq!(area("Terrain Agoè", Some(8_000_000.0)), Some(350.0));
        assert_eq!(area("Terrain Agoè", Some(30_000_000.0)), Some(700.0));
        assert_eq!(area("Terrain Agoè", None), Some(87.5));
    }

    #[test]
    fn land_bands_never_shrink_as_price_grows() {
        let config = PipelineConfig::default();
        let mut last = 0.0;
        let mut price = 50_000.0;
        while price < 50_000_000.0 {
            let a = infer_area("terrain", Some(price), &config).unwrap().area_sqm;
            assert!(a >= last, "area dropped at price {price}");
            last = a;
            price += 50_000.0;
        }
    }

    #[test]
    fn house_tiers() {
        assert_eq!(area("Maison 3 chambres", Some(10_000_000.0)), Some(100.0));
        assert_eq!(area("Maison 3 chambres", Some(20_000_000.0)), Some(200.0));
        assert_eq!(area("Villa à vendre à Agoè", Some(25_000_000.0)), Some(400.0));
        assert_eq!(area("Duplex", None), Some(150.0));

        let rule = infer_area("Villa", Some(25_000_000.0), &PipelineConfig::default())
            .unwrap()
            .rule;
        assert_eq!(rule, InferenceRule::HouseByPrice);
    }

    #[test]
    fn apartment_unit_sizes() {
        assert_eq!(area("Studio meublé", None), Some(35.0));
        assert_eq!(area("Appartement F1", None), Some(35.0));
        assert_eq!(area("Appartement F2", Some(90_000.0)), Some(50.0));
        assert_eq!(area("Appartement F3", None), Some(70.0));
        assert_eq!(area("Appartement F4", None), Some(90.0));
        assert_eq!(area("Appartement", None), Some(60.0));
    }

    #[test]
    fn fallback_divides_price_and_clamps() {
        assert_eq!(area("Belle offre", Some(4_000_000.0)), Some(200.0));
        assert_eq!(area("Belle offre", Some(100_000.0)), Some(20.0));
        assert_eq!(area("Belle offre", Some(500_000_000_000.0)), Some(5000.0));
        assert_eq!(area("Belle offre", None), None);
        assert_eq!(area("Belle offre", Some(5_000.0)), None);
    }

    #[test]
    fn fallback_survives_unvalidated_bounds() {
        let config = PipelineConfig {
            fallback_max_sqm: f64::NAN,
            ..PipelineConfig::default()
        };
        let inferred = infer_area("Belle offre", Some(4_000_000.0), &config).unwrap();
        assert_eq!(inferred.area_sqm, 200.0);
    }

    #[test]
    fn land_keyword_beats_house_keyword() {
        let inferred =
            infer_area("Terrain avec maison", Some(8_000_000.0), &PipelineConfig::default())
                .unwrap();
        assert_eq!(inferred.rule, InferenceRule::LandByPrice);
        assert_eq!(inferred.area_sqm, 350.0);
    }
}
