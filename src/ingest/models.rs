use serde_json::{Map, Value};

// Marketplace export, flattened names as the scraper's CSV emits them.
//
// row
//  ├── id
//  ├── marketplace_listing_title
//  ├── custom_title
//  ├── custom_sub_titles_with_rendering_flags/0/subtitle
//  ├── listing_price
//  │    ├── amount
//  │    └── formatted_amount
//  ├── comparable_price
//  ├── location/reverse_geocode
//  │    ├── city
//  │    └── city_page/display_name
//  ├── listingUrl
//  ├── primary_listing_photo/photo_image_url
//  └── is_sold, is_live, is_pending, is_hidden

pub const ID: &str = "id";
pub const TITLE: &str = "marketplace_listing_title";
pub const CUSTOM_TITLE: &str = "custom_title";
pub const SUBTITLE: &str = "custom_sub_titles_with_rendering_flags/0/subtitle";
pub const PRICE_AMOUNT: &str = "listing_price/amount";
pub const PRICE_FORMATTED: &str = "listing_price/formatted_amount";
pub const COMPARABLE_PRICE: &str = "comparable_price";
pub const CITY: &str = "location/reverse_geocode/city";
pub const CITY_DISPLAY_NAME: &str = "location/reverse_geocode/city_page/display_name";
pub const LISTING_URL: &str = "listingUrl";
pub const PHOTO_URL: &str = "primary_listing_photo/photo_image_url";
pub const IS_SOLD: &str = "is_sold";
pub const IS_LIVE: &str = "is_live";
pub const IS_PENDING: &str = "is_pending";
pub const IS_HIDDEN: &str = "is_hidden";

/// One scraped row as it came in. Field presence is not guaranteed, so
/// every accessor returns an `Option` and nothing here can fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    fields: Map<String, Value>,
}

impl RawListing {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Resolve a field. A flat key wins; otherwise `a/b/0/c` walks nested
    /// objects and arrays. `null` counts as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        if let Some(v) = self.fields.get(field) {
            return non_null(v);
        }
        if !field.contains('/') {
            return None;
        }

        let mut segments = field.split('/');
        let mut current = self.fields.get(segments.next()?)?;
        for seg in segments {
            current = match current {
                Value::Object(map) => map.get(seg)?,
                Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        non_null(current)
    }

    /// Text value, trimmed. Numbers and booleans are rendered; empty is absent.
    pub fn text(&self, field: &str) -> Option<String> {
        let s = match self.get(field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    }

    /// Numeric value. Non-numeric text is absent, never an error.
    pub fn number(&self, field: &str) -> Option<f64> {
        let n = match self.get(field)? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        if n.is_finite() {
            Some(n)
        } else {
            None
        }
    }

    /// Boolean-like flag: `true` or the string "true" in any case.
    pub fn flag(&self, field: &str) -> bool {
        match self.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl From<Map<String, Value>> for RawListing {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn non_null(v: &Value) -> Option<&Value> {
    if v.is_null() {
        None
    } else {
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawListing {
        match v {
            Value::Object(map) => RawListing::new(map),
            _ => panic!("test rows must be objects"),
        }
    }

    #[test]
    fn resolves_flat_and_nested_paths() {
        let flat = raw(json!({ "listing_price/amount": "3500000" }));
        assert_eq!(flat.number(PRICE_AMOUNT), Some(3_500_000.0));

        let nested = raw(json!({
            "listing_price": { "amount": 3500000, "formatted_amount": "CFA3,500,000" },
            "custom_sub_titles_with_rendering_flags": [ { "subtitle": "Lomé" } ]
        }));
        assert_eq!(nested.number(PRICE_AMOUNT), Some(3_500_000.0));
        assert_eq!(nested.text(PRICE_FORMATTED).as_deref(), Some("CFA3,500,000"));
        assert_eq!(nested.text(SUBTITLE).as_deref(), Some("Lomé"));
    }

    #[test]
    fn bad_values_degrade_to_absent() {
        let row = raw(json!({
            "listing_price/amount": "prix à débattre",
            "custom_title": "   ",
            "comparable_price": null,
            "is_sold": "yes"
        }));
        assert_eq!(row.number(PRICE_AMOUNT), None);
        assert_eq!(row.text(CUSTOM_TITLE), None);
        assert_eq!(row.get(COMPARABLE_PRICE), None);
        assert!(!row.flag(IS_SOLD));
        assert_eq!(row.text("missing/deeply/nested"), None);
    }

    #[test]
    fn flags_accept_bool_and_text() {
        let row = raw(json!({ "is_sold": true, "is_live": "TRUE", "is_pending": false }));
        assert!(row.flag(IS_SOLD));
        assert!(row.flag(IS_LIVE));
        assert!(!row.flag(IS_PENDING));
        assert!(!row.flag(IS_HIDDEN));
    }

    #[test]
    fn numeric_id_renders_as_text() {
        let row = raw(json!({ "id": 1234567890123u64 }));
        assert_eq!(row.text(ID).as_deref(), Some("1234567890123"));
    }
}
