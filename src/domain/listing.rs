use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PropertyType {
    Land,
    Villa,
    House,
    Apartment,
    Building,
    Commercial,
    Unknown,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Land => "Land",
            PropertyType::Villa => "Villa",
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Building => "Building",
            PropertyType::Commercial => "Commercial",
            PropertyType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OfferType {
    #[default]
    Sale,
    Rent,
}

impl OfferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferType::Sale => "Sale",
            OfferType::Rent => "Rent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListingStatus {
    Sold,
    Active,
    Pending,
    Hidden,
    Unknown,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Sold => "Sold",
            ListingStatus::Active => "Active",
            ListingStatus::Pending => "Pending",
            ListingStatus::Hidden => "Hidden",
            ListingStatus::Unknown => "Unknown",
        }
    }
}

/// A listing after cleaning. Built once per raw row and never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListing {
    pub id: String,
    pub title: String,
    pub property_type: PropertyType,
    pub offer_type: OfferType,
    pub city: String,
    /// Canonical gazetteer name or "Unspecified".
    pub neighborhood: String,

    pub area_sqm: Option<f64>,
    pub price_amount: Option<f64>,
    /// Derived from price and area only; see `price_per_sqm`.
    pub price_per_sqm: Option<f64>,

    pub status: ListingStatus,
    pub source_url: String,
    pub photo_url: String,
    pub collected_date: NaiveDate,
}

/// `price / area` rounded to cents, present only when both are positive.
pub fn price_per_sqm(price: Option<f64>, area: Option<f64>) -> Option<f64> {
    match (price, area) {
        (Some(p), Some(a)) if p > 0.0 && a > 0.0 => Some(round2(p / a)),
        _ => None,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
