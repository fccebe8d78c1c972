//! Heuristic parsers over a listing title.
//!
//! Each parser is a cascade: patterns are tried in order and the first one
//! that yields a plausible value wins. Nothing here fails; a title that
//! says nothing useful just gives `None`.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PipelineConfig;
use crate::domain::gazetteer::normalize;
use crate::domain::listing::{OfferType, PropertyType};
use crate::ingest::models::{self, RawListing};

mod patterns {
    use super::*;

    /// "1/4 lot", "1/2 de lot"
    pub static FRACTION_LOT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(\d+)/(\d+)\s*(?:de\s*)?lots?").expect("fraction lot regex")
    });

    /// "1 lot et 1/2", "1lot et 1/4"
    pub static MIXED_LOT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(\d+)\s*lots?\s*et\s*(\d+)/(\d+)").expect("mixed lot regex")
    });

    /// "2 lots", "02 lot", "1lot"
    pub static WHOLE_LOT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\d+)\s*lots?\b").expect("whole lot regex"));

    /// "350 m²", "1 500 m²", "350m2", "350 mètres carrés", "350 m carré"
    pub static AREA_UNIT: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(\d{1,3}(?:[\s.,]\d{3})+|\d+)\s*(?:m[²2]|m[eè]tres?\s*carr[eé]s?|m\s*carr[eé]s?)",
        )
        .expect("area unit regex")
    });

    /// "500m", "500 m". Case-sensitive: "45 M" is a price.
    pub static BARE_METERS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\d{2,4})\s*m\b").expect("bare meters regex"));

    /// Currency right after a number: "45 m fcfa", "8m f".
    pub static CURRENCY_AHEAD: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^\s*(?:fcfa|cfa|f)\b").expect("currency regex"));

    /// "terrain 500", "parcelle 400"
    pub static KEYWORD_AREA: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?:terrain|parcelle|plot)\s+(\d{2,4})\b").expect("keyword area regex")
    });

    /// "3,500,000", "3 500 000"
    pub static GROUPED_DIGITS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\d{1,3}(?:[,\s]\d{3})+").expect("grouped digits regex"));

    /// "25 millions", "1,5 million", "12 M". The unit must not run into a
    /// letter or digit, so "450m²" and "300m2" stay areas.
    pub static MILLIONS: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:millions?|m)(?:[^\p{L}\p{N}]|$)")
            .expect("millions regex")
    });

    /// "25mfcfa", "25m cfa", "8mf"
    pub static COMPACT_MILLIONS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(\d+)m\s*(?:fcfa|cfa|f)").expect("compact millions regex"));

    pub static RENTAL: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\b(?:louer|location|rent|rental)\b").expect("rental regex")
    });
}

/* ---------------- Area ---------------- */

/// Surface in square meters, read from the title.
pub fn extract_area(title: &str, lot_area: f64) -> Option<f64> {
    let t = title.to_lowercase();

    // 1. fraction of a lot
    if let Some(c) = patterns::FRACTION_LOT.captures(&t) {
        if let Some(frac) = fraction(&c[1], &c[2]) {
            if let Some(area) = positive(frac * lot_area) {
                return Some(area);
            }
        }
    }

    // 2. whole lots plus a fraction
    if let Some(c) = patterns::MIXED_LOT.captures(&t) {
        if let (Ok(whole), Some(frac)) = (c[1].parse::<f64>(), fraction(&c[2], &c[3])) {
            if let Some(area) = positive((whole + frac) * lot_area) {
                return Some(area);
            }
        }
    }

    // 3. whole lots; past ten it is not a lot count
    if let Some(c) = patterns::WHOLE_LOT.captures(&t) {
        if let Ok(n) = c[1].parse::<u32>() {
            if n <= 10 {
                if let Some(area) = positive(n as f64 * lot_area) {
                    return Some(area);
                }
            }
        }
    }

    // 4. explicit square meters
    if let Some(c) = patterns::AREA_UNIT.captures(&t) {
        if let Some(area) = digits_only(&c[1]).parse::<f64>().ok().and_then(positive) {
            return Some(area);
        }
    }

    // 5. bare "m"
    if let Some((_, area)) = bare_meters(title) {
        return Some(area);
    }

    // 6. number right after a land keyword
    if let Some(c) = patterns::KEYWORD_AREA.captures(&t) {
        if let Some(area) = in_range(&c[1], 50.0, 5000.0) {
            return Some(area);
        }
    }

    None
}

/// First bare "<n> m" that reads as a surface, with its byte span in
/// `title`. The unit must be a lower-case "m" with no currency after it,
/// the title must not mention kilometers, and the value sits in [30, 5000].
fn bare_meters(title: &str) -> Option<(Range<usize>, f64)> {
    if title.to_lowercase().contains("km") {
        return None;
    }
    patterns::BARE_METERS.captures_iter(title).find_map(|c| {
        let whole = c.get(0)?;
        if patterns::CURRENCY_AHEAD.is_match(&title[whole.end()..]) {
            return None;
        }
        in_range(&c[1], 30.0, 5000.0).map(|area| (whole.range(), area))
    })
}

fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn fraction(num: &str, den: &str) -> Option<f64> {
    let num = num.parse::<f64>().ok()?;
    let den = den.parse::<f64>().ok()?;
    if den == 0.0 {
        None
    } else {
        Some(num / den)
    }
}

fn in_range(digits: &str, min: f64, max: f64) -> Option<f64> {
    let v = digits.parse::<f64>().ok()?;
    if (min..=max).contains(&v) {
        Some(v)
    } else {
        None
    }
}

fn positive(v: f64) -> Option<f64> {
    if v > 0.0 && v.is_finite() {
        Some(v)
    } else {
        None
    }
}

/* ---------------- Price ---------------- */

/// Resolve the asking price from the raw row and the title.
///
/// Every fallback only runs while the running value is under the floor.
/// `title_area` is the surface read from the title (not an inferred one)
/// and feeds the last-resort land estimate.
pub fn extract_price(
    raw: &RawListing,
    title: &str,
    title_area: Option<f64>,
    property_type: PropertyType,
    config: &PipelineConfig,
) -> Option<f64> {
    let floor = config.price_floor;
    let t = title.to_lowercase();

    // 1. structured amount
    let mut price = raw.number(models::PRICE_AMOUNT).unwrap_or(0.0);

    // 2. display string, e.g. "CFA3,500,000"
    if price < floor {
        if let Some(v) = raw
            .text(models::PRICE_FORMATTED)
            .and_then(|s| grouped_number(&s))
        {
            price = v;
        }
    }

    // 3. comparable price, only if plausible on its own
    if price < floor {
        if let Some(v) = raw.number(models::COMPARABLE_PRICE) {
            if v >= floor {
                price = v;
            }
        }
    }

    // 4. grouped numeral in the title
    if price < floor {
        if let Some(v) = grouped_number(&t) {
            if v >= floor {
                price = v;
            }
        }
    }

    // 5. "25 millions", "45 M"
    if price < floor {
        if let Some(v) = millions(title) {
            price = v;
        }
    }

    // 6. "25mfcfa"
    if price < floor {
        if let Some(v) = patterns::COMPACT_MILLIONS
            .captures(&t)
            .and_then(|c| c[1].parse::<f64>().ok())
        {
            price = v * 1_000_000.0;
        }
    }

    // 7. land with a known surface: estimate at a low price per m²
    if price < floor && property_type == PropertyType::Land {
        if let Some(area) = title_area.filter(|a| *a > 0.0) {
            price = area * config.land_price_per_sqm;
        }
    }

    valid_price(price, floor)
}

/// Anything in (0, floor) is noise; zero or negative means no price.
pub fn valid_price(price: f64, floor: f64) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 || price < floor {
        None
    } else {
        Some(price)
    }
}

fn grouped_number(text: &str) -> Option<f64> {
    let m = patterns::GROUPED_DIGITS.find(text)?;
    digits_only(m.as_str()).parse::<f64>().ok()
}

/// A token already read as a bare surface is never also a price.
fn millions(title: &str) -> Option<f64> {
    let surface = bare_meters(title).map(|(span, _)| span);
    let c = patterns::MILLIONS.captures_iter(title).find(|c| match (&surface, c.get(0)) {
        (Some(s), Some(m)) => m.end() <= s.start || m.start() >= s.end,
        _ => true,
    })?;
    let n = c[1].replace(',', ".").parse::<f64>().ok()?;
    Some(n * 1_000_000.0)
}

/* ---------------- Classifiers ---------------- */

pub const LAND_KEYWORDS: &[&str] = &["terrain", "parcelle", "plot"];
pub const VILLA_KEYWORDS: &[&str] = &["villa", "duplex"];
pub const HOUSE_KEYWORDS: &[&str] = &["maison", "house"];
pub const APARTMENT_KEYWORDS: &[&str] =
    &["appartement", "apartment", "studio", "f1", "f2", "f3", "f4"];
pub const BUILDING_KEYWORDS: &[&str] = &["immeuble", "building"];
pub const COMMERCIAL_KEYWORDS: &[&str] = &["bureau", "office", "commercial"];

/// Priority ladder, first match wins.
const PROPERTY_RULES: &[(&[&str], PropertyType)] = &[
    (LAND_KEYWORDS, PropertyType::Land),
    (VILLA_KEYWORDS, PropertyType::Villa),
    (HOUSE_KEYWORDS, PropertyType::House),
    (APARTMENT_KEYWORDS, PropertyType::Apartment),
    (BUILDING_KEYWORDS, PropertyType::Building),
    (COMMERCIAL_KEYWORDS, PropertyType::Commercial),
];

pub fn contains_any(normalized: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| normalized.contains(k))
}

/// Most scraped listings are plots, so an unmatched title is land.
pub fn classify_property_type(title: &str) -> PropertyType {
    if title.trim().is_empty() {
        return PropertyType::Unknown;
    }
    let t = normalize(title);
    PROPERTY_RULES
        .iter()
        .find(|(keywords, _)| contains_any(&t, keywords))
        .map(|(_, kind)| *kind)
        .unwrap_or(PropertyType::Land)
}

pub fn classify_offer_type(title: &str) -> OfferType {
    if patterns::RENTAL.is_match(&normalize(title)) {
        OfferType::Rent
    } else {
        OfferType::Sale
    }
}
