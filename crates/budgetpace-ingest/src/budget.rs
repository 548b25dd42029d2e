//! Budget target reader.
//!
//! The budget source carries four columns in fixed order and no header row:
//! month number, year, month name (ignored), monthly target amount. Rows
//! that do not yield a plausible (month, year, amount) triple are skipped
//! individually; duplicate (year, month) rows are all kept, with lookup
//! resolving to the first one.

use budgetpace_core::{BudgetEntry, BudgetTable};
use std::path::Path;
use tracing::{debug, info};

use crate::sheet;
use crate::LoadError;

/// Load the monthly budget table from a workbook.
pub fn load_budget(path: &Path) -> Result<BudgetTable, LoadError> {
    let range = sheet::first_sheet(path)?;
    let mut table = BudgetTable::new();

    for (idx, row) in range.rows().enumerate() {
        if sheet::row_is_blank(row) {
            continue;
        }

        let month = row.first().and_then(sheet::cell_int);
        let year = row.get(1).and_then(sheet::cell_int);
        let (Some(month), Some(year)) = (month, year) else {
            debug!(row = idx + 1, "skipping budget row without numeric month/year");
            continue;
        };
        if !(1..=12).contains(&month) {
            debug!(row = idx + 1, month, "skipping budget row with out-of-range month");
            continue;
        }
        let Some(amount) = row.get(3).and_then(sheet::cell_amount) else {
            debug!(row = idx + 1, "skipping budget row without an amount");
            continue;
        };

        table.push(BudgetEntry::new(year as i32, month as u32, amount));
    }

    info!(path = %path.display(), rows = table.len(), "loaded budget table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use rust_xlsxwriter::Workbook;

    fn write_budget(rows: &[(&str, &str, &str, &str)]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            sheet.write(r as u32, 0, row.0).unwrap();
            sheet.write(r as u32, 1, row.1).unwrap();
            sheet.write(r as u32, 2, row.2).unwrap();
            sheet.write(r as u32, 3, row.3).unwrap();
        }
        workbook.save(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_rows_without_header() {
        let (_dir, path) = write_budget(&[
            ("1", "2024", "January", "30000"),
            ("2", "2024", "February", "28500.50"),
        ]);

        let table = load_budget(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.target_for(2024, 1), Some(dec!(30000)));
        assert_eq!(table.target_for(2024, 2), Some(dec!(28500.50)));
    }

    #[test]
    fn numeric_cells_load_like_strings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write(0, 0, 3.0).unwrap();
        sheet.write(0, 1, 2024.0).unwrap();
        sheet.write(0, 2, "March").unwrap();
        sheet.write(0, 3, 31000.0).unwrap();
        workbook.save(&path).unwrap();

        let table = load_budget(&path).unwrap();
        assert_eq!(table.target_for(2024, 3), Some(dec!(31000)));
    }

    #[test]
    fn skips_malformed_rows() {
        let (_dir, path) = write_budget(&[
            ("Month", "Year", "Name", "Amount"), // stray header in the feed
            ("13", "2024", "Smarch", "1000"),    // out-of-range month
            ("4", "2024", "April", ""),          // missing amount
            ("5", "2024", "May", "40000"),
        ]);

        let table = load_budget(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.target_for(2024, 5), Some(dec!(40000)));
    }

    #[test]
    fn duplicate_period_keeps_first() {
        let (_dir, path) = write_budget(&[
            ("6", "2024", "June", "10000"),
            ("6", "2024", "June", "20000"),
        ]);

        let table = load_budget(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.target_for(2024, 6), Some(dec!(10000)));
    }
}
