// src/domain/logic.rs

use crate::domain::listing::ListingStatus;
use crate::ingest::models::{self, RawListing};

pub const NO_TITLE: &str = "No title";

/// Flag precedence for the listing lifecycle. A listing can be flagged
/// both sold and live; sold wins.
const STATUS_RULES: &[(&str, ListingStatus)] = &[
    (models::IS_SOLD, ListingStatus::Sold),
    (models::IS_LIVE, ListingStatus::Active),
    (models::IS_PENDING, ListingStatus::Pending),
    (models::IS_HIDDEN, ListingStatus::Hidden),
];

pub fn derive_status(raw: &RawListing) -> ListingStatus {
    STATUS_RULES
        .iter()
        .find(|(flag, _)| raw.flag(flag))
        .map(|(_, status)| *status)
        .unwrap_or(ListingStatus::Unknown)
}

/// Marketplace title, then the seller's custom title and the first subtitle
/// when they add something new.
pub fn synthesize_title(raw: &RawListing) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(title) = raw.text(models::TITLE) {
        parts.push(title);
    }

    if let Some(custom) = raw.text(models::CUSTOM_TITLE) {
        let repeated = parts
            .first()
            .map(|first| first.to_lowercase().contains(&custom.to_lowercase()))
            .unwrap_or(false);
        if !repeated {
            parts.push(custom);
        }
    }

    if let Some(subtitle) = raw.text(models::SUBTITLE) {
        if !parts.iter().any(|p| p.contains(&subtitle)) {
            parts.push(subtitle);
        }
    }

    let joined = parts.join(" ");
    if joined.trim().is_empty() {
        NO_TITLE.to_string()
    } else {
        joined
    }
}

/// Reverse-geocoded city, else the head of "Lomé, Togo", else the default.
pub fn derive_city(raw: &RawListing, default_city: &str) -> String {
    if let Some(city) = raw.text(models::CITY) {
        return city;
    }
    raw.text(models::CITY_DISPLAY_NAME)
        .and_then(|display| {
            display
                .split(',')
                .next()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| default_city.to_string())
}
