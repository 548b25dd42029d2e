//! Daily results feed reader.
//!
//! The results source has a header row and five columns in fixed order:
//! date, an unused column, ordered-commitment amount, shipped amount,
//! produced amount. Only those five columns are read. Rows with an
//! unparseable date are dropped and counted, never an error; missing amount
//! cells read as zero.

use budgetpace_core::{DailyResult, ResultsTable};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info};

use crate::sheet;
use crate::LoadError;

/// A loaded results table plus its row-level exclusion count.
#[derive(Debug, Default)]
pub struct ResultsLoad {
    pub table: ResultsTable,
    /// Rows excluded because their date column could not be parsed
    pub dropped: usize,
}

/// Load the daily results feed from a workbook.
pub fn load_results(path: &Path) -> Result<ResultsLoad, LoadError> {
    let range = sheet::first_sheet(path)?;
    let mut table = ResultsTable::new();
    let mut dropped = 0;

    for (idx, row) in range.rows().enumerate() {
        if idx == 0 {
            // header row
            continue;
        }
        if sheet::row_is_blank(row) {
            continue;
        }

        let Some(date) = row.first().and_then(sheet::cell_date) else {
            dropped += 1;
            debug!(row = idx + 1, "dropping results row with unparseable date");
            continue;
        };

        let ordered = row.get(2).and_then(sheet::cell_amount).unwrap_or(Decimal::ZERO);
        let shipped = row.get(3).and_then(sheet::cell_amount).unwrap_or(Decimal::ZERO);
        let produced = row.get(4).and_then(sheet::cell_amount).unwrap_or(Decimal::ZERO);

        table.push(DailyResult::new(date, ordered, shipped, produced));
    }

    info!(
        path = %path.display(),
        rows = table.len(),
        dropped,
        "loaded results feed"
    );
    Ok(ResultsLoad { table, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use rust_xlsxwriter::Workbook;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn write_results(rows: &[(&str, f64, f64, f64)]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write(0, 0, "Date").unwrap();
        sheet.write(0, 1, "Site").unwrap();
        sheet.write(0, 2, "Ordered").unwrap();
        sheet.write(0, 3, "Shipped").unwrap();
        sheet.write(0, 4, "Produced").unwrap();
        for (r, row) in rows.iter().enumerate() {
            let r = r as u32 + 1;
            sheet.write(r, 0, row.0).unwrap();
            sheet.write(r, 1, "ignored").unwrap();
            sheet.write(r, 2, row.1).unwrap();
            sheet.write(r, 3, row.2).unwrap();
            sheet.write(r, 4, row.3).unwrap();
        }
        workbook.save(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_rows_and_skips_header() {
        let (_dir, path) = write_results(&[
            ("2024-03-01", 100.0, 200.0, 300.0),
            ("2024-03-04", 150.0, 250.0, 350.0),
        ]);

        let load = load_results(&path).unwrap();
        assert_eq!(load.table.len(), 2);
        assert_eq!(load.dropped, 0);

        let first = load.table.iter().next().unwrap();
        assert_eq!(first.date, date(2024, 3, 1));
        assert_eq!(first.ordered, dec!(100));
        assert_eq!(first.shipped, dec!(200));
        assert_eq!(first.produced, dec!(300));
    }

    #[test]
    fn drops_and_counts_bad_dates() {
        let (_dir, path) = write_results(&[
            ("2024-03-01", 1.0, 2.0, 3.0),
            ("yesterday", 4.0, 5.0, 6.0),
            ("2024-03-05", 7.0, 8.0, 9.0),
        ]);

        let load = load_results(&path).unwrap();
        assert_eq!(load.table.len(), 2);
        assert_eq!(load.dropped, 1);
    }

    #[test]
    fn duplicate_dates_are_kept_as_rows() {
        let (_dir, path) = write_results(&[
            ("2024-03-01", 10.0, 10.0, 10.0),
            ("2024-03-01", 5.0, 5.0, 5.0),
        ]);

        let load = load_results(&path).unwrap();
        // summing is the aggregator's job; the reader keeps both rows
        assert_eq!(load.table.len(), 2);
    }

    #[test]
    fn missing_amounts_read_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write(0, 0, "Date").unwrap();
        sheet.write(1, 0, "2024-03-01").unwrap();
        // columns B through E left entirely empty
        workbook.save(&path).unwrap();

        let load = load_results(&path).unwrap();
        assert_eq!(load.table.len(), 1);
        let row = load.table.iter().next().unwrap();
        assert_eq!(row.ordered, Decimal::ZERO);
        assert_eq!(row.shipped, Decimal::ZERO);
        assert_eq!(row.produced, Decimal::ZERO);
    }

    #[test]
    fn unreachable_file_is_an_open_error() {
        let err = load_results(Path::new("/nonexistent/results.xls")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
