//! Shared workbook access and cell coercion helpers.

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::LoadError;

/// Open a workbook of any supported format and return its first worksheet.
pub(crate) fn first_sheet(path: &Path) -> Result<Range<Data>, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::NoWorksheet {
            path: path.to_path_buf(),
        })?;

    workbook
        .worksheet_range(&name)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Coerce a cell to a calendar date, discarding any time component.
///
/// Native Excel datetime cells are used as-is; string cells accept ISO
/// (`2024-03-01`) and day-first (`01/03/2024`) forms, with or without a
/// trailing time of day.
pub(crate) fn cell_date(cell: &Data) -> Option<NaiveDate> {
    if let Some(date) = cell.as_date() {
        return Some(date);
    }
    match cell {
        Data::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"];

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Coerce a cell to a monetary amount.
///
/// Numeric cells convert directly; string cells accept `,` or `.` decimal
/// separators and embedded spaces as thousands grouping.
pub(crate) fn cell_amount(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Float(f) => Decimal::from_f64_retain(*f),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => {
            let cleaned = s.trim().replace([' ', '\u{a0}'], "").replace(',', ".");
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(&cleaned).ok()
        }
        _ => None,
    }
}

/// Coerce a cell to an integer (month and year columns).
pub(crate) fn cell_int(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) if f.fract() == 0.0 => Some(*f as i64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// True when every cell of the row is empty.
pub(crate) fn row_is_blank(row: &[Data]) -> bool {
    row.iter().all(DataType::is_empty)
}
