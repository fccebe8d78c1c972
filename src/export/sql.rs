use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::Result;
use crate::export::{Cell, ExportRecord, COLUMNS};

pub const TABLE: &str = "listings";

pub fn write_sql_script(records: &[ExportRecord], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(render_script(records).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Header comment, schema, then one INSERT per record.
pub fn render_script(records: &[ExportRecord]) -> String {
    let mut script = format!("-- Cleaned listings: {} rows\n\n", records.len());
    script.push_str(crate::db::SCHEMA_SQL);
    if !script.ends_with('\n') {
        script.push('\n');
    }
    script.push('\n');
    for record in records {
        script.push_str(&insert_statement(record));
        script.push('\n');
    }
    script
}

pub fn insert_statement(record: &ExportRecord) -> String {
    let values = record
        .cells()
        .iter()
        .map(sql_literal)
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {TABLE} ({}) VALUES ({values});", COLUMNS.join(", "))
}

pub fn sql_literal(cell: &Cell) -> String {
    match cell {
        Cell::Null => "NULL".to_string(),
        Cell::Number(v) => v.to_string(),
        Cell::Text(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_escape_and_null() {
        assert_eq!(sql_literal(&Cell::Null), "NULL");
        assert_eq!(sql_literal(&Cell::Number(87.5)), "87.5");
        assert_eq!(sql_literal(&Cell::Number(350.0)), "350");
        assert_eq!(
            sql_literal(&Cell::Text("Villa l'Agoè".into())),
            "'Villa l''Agoè'"
        );
    }
}
