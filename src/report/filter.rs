use crate::domain::NormalizedListing;

/// A row is kept when price, area and price per m² are all present and
/// positive. This is the only place rows get dropped.
pub fn is_valid(listing: &NormalizedListing) -> bool {
    let positive = |v: Option<f64>| v.map(|x| x > 0.0).unwrap_or(false);
    positive(listing.price_amount) && positive(listing.area_sqm) && positive(listing.price_per_sqm)
}

/// Split into (valid, invalid), each keeping input order.
pub fn partition(
    listings: Vec<NormalizedListing>,
) -> (Vec<NormalizedListing>, Vec<NormalizedListing>) {
    listings.into_iter().partition(is_valid)
}

pub fn valid_rate(valid: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        valid as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{ListingStatus, OfferType, PropertyType};
    use chrono::NaiveDate;

    fn listing(
        id: &str,
        price: Option<f64>,
        area: Option<f64>,
        ppsqm: Option<f64>,
    ) -> NormalizedListing {
        NormalizedListing {
            id: id.to_string(),
            title: "Terrain".to_string(),
            property_type: PropertyType::Land,
            offer_type: OfferType::Sale,
            city: "Lomé".to_string(),
            neighborhood: "Agoè".to_string(),
            area_sqm: area,
            price_amount: price,
            price_per_sqm: ppsqm,
            status: ListingStatus::Active,
            source_url: String::new(),
            photo_url: String::new(),
            collected_date: NaiveDate::from_ymd_opt(2026, 2, 12).unwrap(),
        }
    }

    #[test]
    fn needs_all_three_fields() {
        assert!(is_valid(&listing("a", Some(1e6), Some(100.0), Some(1e4))));
        assert!(!is_valid(&listing("b", None, Some(100.0), None)));
        assert!(!is_valid(&listing("c", Some(1e6), None, None)));
        assert!(!is_valid(&listing("d", Some(1e6), Some(100.0), None)));
        assert!(!is_valid(&listing("e", Some(1e6), Some(0.0), Some(0.0))));
    }

    #[test]
    fn partition_keeps_order() {
        let rows = vec![
            listing("1", Some(1e6), Some(100.0), Some(1e4)),
            listing("2", None, None, None),
            listing("3", Some(2e6), Some(100.0), Some(2e4)),
        ];
        let (valid, invalid) = partition(rows);
        let ids: Vec<_> = valid.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(invalid.len(), 1);
        assert_eq!(valid_rate(valid.len(), 3), 2.0 / 3.0 * 100.0);
        assert_eq!(valid_rate(0, 0), 0.0);
    }
}
