//! Market statistics over the valid rows.

use std::collections::{BTreeMap, HashMap};

use crate::domain::gazetteer::UNSPECIFIED;
use crate::domain::{NormalizedListing, OfferType, PropertyType};
use crate::report::filter::valid_rate;

#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodStats {
    pub name: String,
    pub count: usize,
    pub mean_price_per_sqm: f64,
    pub median_price_per_sqm: f64,
    pub min_price_per_sqm: f64,
    pub max_price_per_sqm: f64,
    pub mean_area_sqm: f64,
    pub mean_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketSummary {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub valid_rate: f64,
    pub mean_price_per_sqm: Option<f64>,
    pub median_price_per_sqm: Option<f64>,
    pub mean_area_sqm: Option<f64>,
    pub mean_price: Option<f64>,
    pub median_price: Option<f64>,
    /// Valid rows whose neighborhood is known.
    pub located_rows: usize,
    /// Sorted by count, most listings first.
    pub by_neighborhood: Vec<NeighborhoodStats>,
    pub by_property_type: BTreeMap<PropertyType, usize>,
    pub by_offer_type: BTreeMap<OfferType, usize>,
}

impl MarketSummary {
    /// `valid` must already be filtered; `total_rows` is the input size.
    pub fn compute(valid: &[NormalizedListing], total_rows: usize) -> Self {
        let ppsqm: Vec<f64> = valid.iter().filter_map(|l| l.price_per_sqm).collect();
        let areas: Vec<f64> = valid.iter().filter_map(|l| l.area_sqm).collect();
        let prices: Vec<f64> = valid.iter().filter_map(|l| l.price_amount).collect();

        let mut by_property_type = BTreeMap::new();
        let mut by_offer_type = BTreeMap::new();
        for l in valid {
            *by_property_type.entry(l.property_type).or_insert(0) += 1;
            *by_offer_type.entry(l.offer_type).or_insert(0) += 1;
        }

        let by_neighborhood = neighborhood_stats(valid);
        let located_rows = by_neighborhood.iter().map(|n| n.count).sum();

        MarketSummary {
            total_rows,
            valid_rows: valid.len(),
            valid_rate: valid_rate(valid.len(), total_rows),
            mean_price_per_sqm: mean(&ppsqm),
            median_price_per_sqm: median(&ppsqm),
            mean_area_sqm: mean(&areas),
            mean_price: mean(&prices),
            median_price: median(&prices),
            located_rows,
            by_neighborhood,
            by_property_type,
            by_offer_type,
        }
    }
}

fn neighborhood_stats(valid: &[NormalizedListing]) -> Vec<NeighborhoodStats> {
    let mut groups: HashMap<&str, Vec<&NormalizedListing>> = HashMap::new();
    for l in valid.iter().filter(|l| l.neighborhood != UNSPECIFIED) {
        groups.entry(l.neighborhood.as_str()).or_default().push(l);
    }

    let mut out: Vec<NeighborhoodStats> = groups
        .into_iter()
        .filter_map(|(name, rows)| {
            let ppsqm: Vec<f64> = rows.iter().filter_map(|l| l.price_per_sqm).collect();
            let areas: Vec<f64> = rows.iter().filter_map(|l| l.area_sqm).collect();
            let prices: Vec<f64> = rows.iter().filter_map(|l| l.price_amount).collect();
            Some(NeighborhoodStats {
                name: name.to_string(),
                count: rows.len(),
                mean_price_per_sqm: mean(&ppsqm)?,
                median_price_per_sqm: median(&ppsqm)?,
                min_price_per_sqm: ppsqm.iter().copied().fold(f64::INFINITY, f64::min),
                max_price_per_sqm: ppsqm.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                mean_area_sqm: mean(&areas)?,
                mean_price: mean(&prices)?,
            })
        })
        .collect();

    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    out
}

/// Interquartile-range outliers on price per m². Diagnostic only.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport<'a> {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outliers: Vec<&'a NormalizedListing>,
}

impl<'a> OutlierReport<'a> {
    /// `None` when no row has a price per m².
    pub fn compute(valid: &'a [NormalizedListing]) -> Option<Self> {
        let values: Vec<f64> = valid.iter().filter_map(|l| l.price_per_sqm).collect();
        let q1 = quantile(&values, 0.25)?;
        let q3 = quantile(&values, 0.75)?;
        let iqr = q3 - q1;
        let lower_bound = q1 - 1.5 * iqr;
        let upper_bound = q3 + 1.5 * iqr;

        let outliers = valid
            .iter()
            .filter(|l| {
                l.price_per_sqm
                    .map(|v| v < lower_bound || v > upper_bound)
                    .unwrap_or(false)
            })
            .collect();

        Some(Self {
            q1,
            q3,
            iqr,
            lower_bound,
            upper_bound,
            outliers,
        })
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{price_per_sqm, ListingStatus};
    use chrono::NaiveDate;

    fn row(
        hood: &str,
        kind: PropertyType,
        offer: OfferType,
        price: f64,
        area: f64,
    ) -> NormalizedListing {
        NormalizedListing {
            id: format!("{hood}-{price}"),
            title: "t".to_string(),
            property_type: kind,
            offer_type: offer,
            city: "Lomé".to_string(),
            neighborhood: hood.to_string(),
            area_sqm: Some(area),
            price_amount: Some(price),
            price_per_sqm: price_per_sqm(Some(price), Some(area)),
            status: ListingStatus::Active,
            source_url: String::new(),
            photo_url: String::new(),
            collected_date: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
        }
    }

    #[test]
    fn quantiles_interpolate() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.25), Some(1.75));
        assert_eq!(quantile(&v, 0.75), Some(3.25));
        assert_eq!(median(&v), Some(2.5));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn summary_groups_and_counts() {
        let valid = vec![
            row("Agoè", PropertyType::Land, OfferType::Sale, 3_500_000.0, 350.0),
            row("Agoè", PropertyType::Land, OfferType::Sale, 7_000_000.0, 350.0),
            row("Bè", PropertyType::Villa, OfferType::Sale, 40_000_000.0, 400.0),
            row(UNSPECIFIED, PropertyType::Apartment, OfferType::Rent, 150_000.0, 60.0),
        ];
        let s = MarketSummary::compute(&valid, 8);

        assert_eq!(s.total_rows, 8);
        assert_eq!(s.valid_rows, 4);
        assert_eq!(s.valid_rate, 50.0);
        assert_eq!(s.located_rows, 3);
        assert_eq!(s.by_property_type[&PropertyType::Land], 2);
        assert_eq!(s.by_offer_type[&OfferType::Rent], 1);
        assert_eq!(s.by_neighborhood.len(), 2);

        let agoe = &s.by_neighborhood[0];
        assert_eq!(agoe.name, "Agoè");
        assert_eq!(agoe.count, 2);
        assert_eq!(agoe.mean_price_per_sqm, 15_000.0);
        assert_eq!(agoe.min_price_per_sqm, 10_000.0);
        assert_eq!(agoe.max_price_per_sqm, 20_000.0);
        assert!(s.by_neighborhood.iter().all(|n| n.name != UNSPECIFIED));
    }

    #[test]
    fn empty_summary_has_no_means() {
        let s = MarketSummary::compute(&[], 10);
        assert_eq!(s.valid_rows, 0);
        assert_eq!(s.mean_price_per_sqm, None);
        assert_eq!(s.median_price_per_sqm, None);
        assert!(s.by_neighborhood.is_empty());
    }

    #[test]
    fn iqr_flags_extremes_without_removing_them() {
        let mut valid: Vec<_> = [10_000.0, 11_000.0, 12_000.0, 13_000.0, 14_000.0]
            .iter()
            .map(|ppsqm| row("Agoè", PropertyType::Land, OfferType::Sale, ppsqm * 100.0, 100.0))
            .collect();
        valid.push(row("Bè", PropertyType::Land, OfferType::Sale, 50_000_000.0, 100.0));

        let report = OutlierReport::compute(&valid).unwrap();
        assert_eq!(report.outliers.len(), 1);
        assert_eq!(report.outliers[0].neighborhood, "Bè");
        assert!(report.lower_bound < 10_000.0);
        assert_eq!(valid.len(), 6);

        assert!(OutlierReport::compute(&[]).is_none());
    }
}
