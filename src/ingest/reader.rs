// ingest/reader.rs
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::errors::{CleanerError, Result};
use crate::ingest::models::RawListing;

/// Load the raw table. `.json` is an array of objects, anything else is CSV.
/// An empty table is an error: there is nothing to clean.
pub fn read_table(path: &Path) -> Result<Vec<RawListing>> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let file = File::open(path)?;
    let rows = if is_json {
        read_json(BufReader::new(file))?
    } else {
        read_csv(BufReader::new(file))?
    };

    if rows.is_empty() {
        return Err(CleanerError::Input(format!(
            "{} contains no rows",
            path.display()
        )));
    }

    tracing::info!("📂 {} rows loaded from {}", rows.len(), path.display());
    Ok(rows)
}

/// Header row gives the field names; empty cells are left out of the row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawListing>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        // Excel-saved exports lead with a BOM.
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let mut fields = Map::new();
        for (name, cell) in headers.iter().zip(record.iter()) {
            if !cell.trim().is_empty() {
                fields.insert(name.clone(), Value::String(cell.to_string()));
            }
        }
        rows.push(RawListing::new(fields));
    }
    Ok(rows)
}

pub fn read_json<R: Read>(reader: R) -> Result<Vec<RawListing>> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = match value {
        Value::Array(items) => items,
        _ => {
            return Err(CleanerError::Input(
                "JSON input must be an array of listing objects".into(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(RawListing::new(map)),
            other => Err(CleanerError::Input(format!(
                "row {i} is not an object: {other}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::models::{ID, IS_SOLD, PRICE_AMOUNT, TITLE};

    #[test]
    fn csv_rows_keep_header_names() {
        let data = "\u{feff}id,marketplace_listing_title,listing_price/amount,is_sold\n\
                    1,Terrain 1 lot à Agoè,5000000,false\n\
                    2,\"Villa, 4 chambres\",,true\n";
        let rows = read_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text(ID).as_deref(), Some("1"));
        assert_eq!(rows[0].number(PRICE_AMOUNT), Some(5_000_000.0));
        assert_eq!(rows[1].text(TITLE).as_deref(), Some("Villa, 4 chambres"));
        assert_eq!(rows[1].get(PRICE_AMOUNT), None);
        assert!(rows[1].flag(IS_SOLD));
    }

    #[test]
    fn json_must_be_array_of_objects() {
        assert!(read_json(r#"{"id": 1}"#.as_bytes()).is_err());
        assert!(read_json(r#"[{"id": 1}, 3]"#.as_bytes()).is_err());
        assert!(read_json("not json".as_bytes()).is_err());

        let rows = read_json(r#"[{"id": 1}, {"id": "2"}]"#.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn empty_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "id,marketplace_listing_title\n").unwrap();

        assert!(matches!(read_table(&path), Err(CleanerError::Input(_))));
        assert!(matches!(
            read_table(&dir.path().join("missing.csv")),
            Err(CleanerError::Io(_))
        ));
    }
}
