use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::config::PipelineConfig;
use crate::domain::Pipeline;
use crate::ingest::models::{self, RawListing};

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).expect("valid date")
}

pub fn pipeline() -> Pipeline {
    Pipeline::new(PipelineConfig::default()).expect("default config is valid")
}

pub fn raw(value: Value) -> RawListing {
    match value {
        Value::Object(map) => RawListing::from(map),
        other => panic!("fixture must be an object, got {other}"),
    }
}

/// Row with just an id, a title and optionally a structured price.
pub fn titled(id: &str, title: &str, amount: Option<f64>) -> RawListing {
    let mut fields = Map::new();
    fields.insert(models::ID.into(), json!(id));
    fields.insert(models::TITLE.into(), json!(title));
    fields.insert(
        models::LISTING_URL.into(),
        json!(format!("https://example.test/item/{id}")),
    );
    fields.insert(models::IS_LIVE.into(), json!(true));
    if let Some(a) = amount {
        fields.insert(models::PRICE_AMOUNT.into(), json!(a));
    }
    RawListing::from(fields)
}

/// A small mixed table: valid land, house and apartment rows plus rows
/// that must be filtered out.
pub fn sample_table() -> Vec<RawListing> {
    vec![
        titled("1", "Terrain 450m² à Bè", None),
        titled("2", "Villa à vendre 25 000 000 FCFA à Agoè", None),
        titled("3", "Terrain 1/4 lot à vendre Adidogomé", Some(3_000_000.0)),
        titled("4", "Appartement F3 à louer 150 000 FCFA", None),
        titled("5", "Maison", Some(5_000.0)),
        titled("6", "", None),
        raw(json!({
            "id": "7",
            "marketplace_listing_title": "Parcelle 2 lots Bè-Kpota",
            "listing_price": { "amount": "18000000", "formatted_amount": "CFA18,000,000" },
            "location": { "reverse_geocode": { "city": "Lomé" } },
            "is_sold": "TRUE",
        })),
    ]
}
