use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::Result;
use crate::export::ExportRecord;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Comma-separated with a BOM so spreadsheet tools detect UTF-8.
/// Nulls are empty cells.
pub fn write_csv(records: &[ExportRecord], path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(UTF8_BOM)?;
    write_records(records, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn write_records<W: Write>(records: &[ExportRecord], out: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(crate::export::COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
