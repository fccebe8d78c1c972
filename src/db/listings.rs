use rusqlite::types::{ToSqlOutput, Value};
use rusqlite::{params_from_iter, ToSql};

use crate::db::connection::Database;
use crate::errors::{CleanerError, Result};
use crate::export::{Cell, ExportRecord, COLUMNS};

impl ToSql for Cell {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Text(s) => ToSqlOutput::from(s.as_str()),
            Cell::Number(v) => ToSqlOutput::from(*v),
            Cell::Null => ToSqlOutput::Owned(Value::Null),
        })
    }
}

/// Upsert every record in a single transaction. Returns rows written.
/// Records without an id cannot be keyed and are skipped.
pub fn save_listings(db: &Database, records: &[ExportRecord]) -> Result<usize> {
    let placeholders = (1..=COLUMNS.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "INSERT OR REPLACE INTO listings ({}) VALUES ({placeholders})",
        COLUMNS.join(", ")
    );

    let written = db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| CleanerError::Db(e.to_string()))?;
        let mut written = 0;
        {
            let mut stmt = tx
                .prepare(&sql)
                .map_err(|e| CleanerError::Db(e.to_string()))?;
            for record in records {
                if record.id.is_empty() {
                    tracing::warn!("Skipping record without id: '{}'", record.title);
                    continue;
                }
                stmt.execute(params_from_iter(record.cells().iter()))
                    .map_err(|e| CleanerError::Db(e.to_string()))?;
                written += 1;
            }
        }
        tx.commit().map_err(|e| CleanerError::Db(e.to_string()))?;
        Ok(written)
    })?;

    tracing::info!("💾 Saved {written} listings to {}", db.path().display());
    Ok(written)
}

pub fn count_listings(db: &Database) -> Result<i64> {
    db.with_conn(|conn| {
        conn.query_row("SELECT COUNT(*) FROM listings", [], |row| row.get(0))
            .map_err(|e| CleanerError::Db(e.to_string()))
    })
}
