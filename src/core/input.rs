//! Tabular input reader: a `.csv` or `.xlsx` file with a `site` column of
//! identifiers, read fully into memory before any network work starts.

use crate::domain::model::RawCell;
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

const ID_COLUMN: &str = "site";

pub fn read_identifiers(path: &str) -> Result<Vec<RawCell>> {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("csv") => read_csv(path),
        Some("xlsx") => read_xlsx(path),
        _ => Err(EtlError::UnsupportedInputError {
            path: path.to_string(),
        }),
    }
}

fn read_csv(path: &str) -> Result<Vec<RawCell>> {
    let mut reader = csv::Reader::from_path(path)?;
    let column = reader
        .headers()?
        .iter()
        .position(|header| header == ID_COLUMN)
        .ok_or_else(|| missing_column(path))?;

    let mut cells = Vec::new();
    for row in reader.records() {
        let row = row?;
        cells.push(parse_text_cell(row.get(column).unwrap_or("")));
    }
    Ok(cells)
}

fn read_xlsx(path: &str) -> Result<Vec<RawCell>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| EtlError::InputError {
            message: format!("{}: workbook has no sheets", path),
        })?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let column = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s == ID_COLUMN))
        })
        .ok_or_else(|| missing_column(path))?;

    let mut cells = Vec::new();
    for row in rows {
        cells.push(parse_sheet_cell(row.get(column).unwrap_or(&Data::Empty)));
    }
    Ok(cells)
}

fn missing_column(path: &str) -> EtlError {
    EtlError::InputError {
        message: format!("{}: no '{}' column found", path, ID_COLUMN),
    }
}

/// CSV gives untyped text, so numeric-looking cells are inferred: integers
/// route to iTunes, fractional numbers are classification failures, and any
/// other non-empty text is a package name.
fn parse_text_cell(raw: &str) -> RawCell {
    let raw = raw.trim();
    if raw.is_empty() {
        return RawCell::Other(String::new());
    }
    if let Ok(id) = raw.parse::<i64>() {
        return RawCell::Int(id);
    }
    if raw.parse::<f64>().is_ok() {
        return RawCell::Other(raw.to_string());
    }
    RawCell::Text(raw.to_string())
}

/// Workbook cells carry their own types. Excel stores all numbers as floats,
/// so integral floats count as ids; text cells are taken verbatim.
fn parse_sheet_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Int(id) => RawCell::Int(*id),
        Data::Float(f) if f.fract() == 0.0 => RawCell::Int(*f as i64),
        Data::String(s) if !s.trim().is_empty() => RawCell::Text(s.trim().to_string()),
        other => RawCell::Other(other.to_string()),
    }
}
