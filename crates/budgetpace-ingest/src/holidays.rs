//! Holiday calendar reader.
//!
//! The holiday source is a single-column table: a header row followed by one
//! date per row. Every value joins the `HolidaySet`; time-of-day is
//! discarded. A non-empty cell that cannot be read as a date fails the whole
//! source, since a silently half-loaded calendar would skew every
//! working-day count downstream.

use budgetpace_core::HolidaySet;
use std::path::Path;
use tracing::info;

use crate::sheet;
use crate::LoadError;

/// Load the holiday calendar from a workbook.
pub fn load_holidays(path: &Path) -> Result<HolidaySet, LoadError> {
    let range = sheet::first_sheet(path)?;
    let mut holidays = HolidaySet::new();

    for (idx, row) in range.rows().enumerate() {
        if idx == 0 {
            // header row
            continue;
        }
        let Some(cell) = row.first() else { continue };
        if calamine::DataType::is_empty(cell) {
            continue;
        }
        match sheet::cell_date(cell) {
            Some(date) => holidays.insert(date),
            None => {
                return Err(LoadError::Schema {
                    path: path.to_path_buf(),
                    message: format!("row {}: first column is not a date", idx + 1),
                });
            }
        }
    }

    info!(
        path = %path.display(),
        holidays = holidays.len(),
        "loaded holiday calendar"
    );
    Ok(holidays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn loads_string_dates_and_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holidays.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write(0, 0, "Date").unwrap();
        sheet.write(1, 0, "2024-05-01").unwrap();
        sheet.write(2, 0, "01/11/2024").unwrap();
        workbook.save(&path).unwrap();

        let holidays = load_holidays(&path).unwrap();
        assert_eq!(holidays.len(), 2);
        assert!(holidays.contains(date(2024, 5, 1)));
        assert!(holidays.contains(date(2024, 11, 1)));
    }

    #[test]
    fn loads_native_datetime_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holidays.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        sheet.write(0, 0, "Date").unwrap();
        sheet
            .write_with_format(1, 0, &ExcelDateTime::from_ymd(2024, 12, 25).unwrap(), &date_format)
            .unwrap();
        workbook.save(&path).unwrap();

        let holidays = load_holidays(&path).unwrap();
        assert!(holidays.contains(date(2024, 12, 25)));
    }

    #[test]
    fn rejects_non_date_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holidays.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write(0, 0, "Date").unwrap();
        sheet.write(1, 0, "2024-05-01").unwrap();
        sheet.write(2, 0, "not a date").unwrap();
        workbook.save(&path).unwrap();

        let err = load_holidays(&path).unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }));
    }

    #[test]
    fn unreachable_file_is_an_open_error() {
        let err = load_holidays(Path::new("/nonexistent/holidays.xlsx")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
