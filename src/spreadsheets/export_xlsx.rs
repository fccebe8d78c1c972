use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::errors::{CleanerError, Result};
use crate::export::{Cell, ExportRecord, COLUMNS};
use crate::report::MarketSummary;

fn xlsx_err(what: &str) -> impl Fn(XlsxError) -> CleanerError + '_ {
    move |e| CleanerError::Xlsx(format!("Failed to write {what}: {e}"))
}

/// Workbook with a "Data" sheet (one row per record), a "Statistics"
/// sheet of label/value pairs and a "Neighborhoods" sheet.
pub fn export_listings_xlsx(
    records: &[ExportRecord],
    summary: &MarketSummary,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let data = workbook.add_worksheet();
        data.set_name("Data").map_err(xlsx_err("sheet name"))?;
        write_data(data, records, &bold)?;
    }

    {
        let stats = workbook.add_worksheet();
        stats.set_name("Statistics").map_err(xlsx_err("sheet name"))?;
        write_statistics(stats, summary, &bold)?;
    }

    {
        let hoods = workbook.add_worksheet();
        hoods.set_name("Neighborhoods").map_err(xlsx_err("sheet name"))?;
        write_neighborhoods(hoods, summary, &bold)?;
    }

    workbook.save(path).map_err(xlsx_err("workbook"))?;
    Ok(())
}

fn write_data(sheet: &mut Worksheet, records: &[ExportRecord], bold: &Format) -> Result<()> {
    // Headers
    for (col, header) in COLUMNS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, bold)
            .map_err(xlsx_err("header"))?;
    }

    // Rows
    for (i, record) in records.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in record.cells().iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(r, col, s).map_err(xlsx_err(COLUMNS[col as usize]))?;
                }
                Cell::Number(v) => {
                    sheet.write_number(r, col, *v).map_err(xlsx_err(COLUMNS[col as usize]))?;
                }
                Cell::Null => {}
            }
        }
    }
    Ok(())
}

pub const NEIGHBORHOOD_HEADERS: [&str; 8] = [
    "Neighborhood",
    "Count",
    "Mean price per m²",
    "Median price per m²",
    "Min price per m²",
    "Max price per m²",
    "Mean area (m²)",
    "Mean price",
];

fn write_neighborhoods(
    sheet: &mut Worksheet,
    summary: &MarketSummary,
    bold: &Format,
) -> Result<()> {
    for (col, header) in NEIGHBORHOOD_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, bold)
            .map_err(xlsx_err("header"))?;
    }

    for (i, n) in summary.by_neighborhood.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &n.name).map_err(xlsx_err("neighborhood"))?;
        let values = [
            n.count as f64,
            n.mean_price_per_sqm,
            n.median_price_per_sqm,
            n.min_price_per_sqm,
            n.max_price_per_sqm,
            n.mean_area_sqm,
            n.mean_price,
        ];
        for (offset, v) in values.iter().enumerate() {
            sheet
                .write_number(r, (offset + 1) as u16, *v)
                .map_err(xlsx_err(NEIGHBORHOOD_HEADERS[offset + 1]))?;
        }
    }
    Ok(())
}

fn write_statistics(sheet: &mut Worksheet, summary: &MarketSummary, bold: &Format) -> Result<()> {
    let mut rows: Vec<(String, Option<f64>)> = vec![
        ("Total rows".into(), Some(summary.total_rows as f64)),
        ("Valid rows".into(), Some(summary.valid_rows as f64)),
        ("Valid rate (%)".into(), Some(summary.valid_rate)),
        ("Mean price per m²".into(), summary.mean_price_per_sqm),
        ("Median price per m²".into(), summary.median_price_per_sqm),
        ("Mean area (m²)".into(), summary.mean_area_sqm),
        ("Mean price".into(), summary.mean_price),
        ("Median price".into(), summary.median_price),
        ("Rows with neighborhood".into(), Some(summary.located_rows as f64)),
    ];
    for (kind, n) in &summary.by_property_type {
        rows.push((format!("Type: {}", kind.as_str()), Some(*n as f64)));
    }
    for (offer, n) in &summary.by_offer_type {
        rows.push((format!("Offer: {}", offer.as_str()), Some(*n as f64)));
    }

    sheet
        .write_string_with_format(0, 0, "Indicator", bold)
        .map_err(xlsx_err("header"))?;
    sheet
        .write_string_with_format(0, 1, "Value", bold)
        .map_err(xlsx_err("header"))?;

    for (i, (label, value)) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, label).map_err(xlsx_err("label"))?;
        if let Some(v) = value {
            sheet.write_number(r, 1, *v).map_err(xlsx_err("value"))?;
        }
    }
    Ok(())
}
