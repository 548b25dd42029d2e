//! # budgetpace-core
//!
//! Core domain model and traits for the budgetpace reporting pipeline.
//!
//! This crate provides:
//! - Source tables: `HolidaySet`, `BudgetTable`, `ResultsTable`
//! - Aggregation output: `PeriodKey`, `PeriodRecord`, `Report`
//! - Run metadata: `RunSummary`
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use budgetpace_core::{BudgetEntry, BudgetTable, HolidaySet};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let mut holidays = HolidaySet::new();
//! holidays.insert(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
//!
//! let mut budget = BudgetTable::new();
//! budget.push(BudgetEntry::new(2024, 5, Decimal::from(40_000)));
//!
//! assert!(!holidays.is_working_day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
//! assert_eq!(budget.target_for(2024, 5), Some(Decimal::from(40_000)));
//! ```

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Calendar year
pub type Year = i32;

/// Month number within a year (1-12)
pub type MonthNumber = u32;

/// Month key reserved for the annual roll-up record
pub const ANNUAL_KEY: MonthNumber = 0;

/// Label used for the 13th slot of annual histogram series
pub const TOTAL_LABEL: &str = "TOTAL";

// ============================================================================
// HolidaySet
// ============================================================================

/// Non-working calendar dates beyond weekends.
///
/// Loaded once per run from the holiday source; immutable afterwards. Owns
/// the working-day rule used everywhere: a day works iff it falls Monday
/// through Friday and is not listed here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from any collection of dates
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Check if a date is a working day (Mon-Fri and not a holiday)
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            return false;
        }
        !self.contains(date)
    }
}

// ============================================================================
// Budget
// ============================================================================

/// One monthly budget target as read from the budget source
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub year: Year,
    pub month: MonthNumber,
    /// Monthly target amount
    pub amount: Decimal,
}

impl BudgetEntry {
    pub fn new(year: Year, month: MonthNumber, amount: Decimal) -> Self {
        Self { year, month, amount }
    }
}

/// Monthly budget targets in source order.
///
/// Duplicate (year, month) rows are kept; lookup returns the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTable {
    entries: Vec<BudgetEntry>,
}

impl BudgetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: BudgetEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BudgetEntry> {
        self.entries.iter()
    }

    /// Target amount for a period; first match wins on duplicates
    pub fn target_for(&self, year: Year, month: MonthNumber) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.year == year && e.month == month)
            .map(|e| e.amount)
    }

    /// All (year, month) pairs carrying a budget target
    pub fn periods(&self) -> impl Iterator<Item = PeriodKey> + '_ {
        self.entries.iter().map(|e| PeriodKey::new(e.year, e.month))
    }
}

// ============================================================================
// Results
// ============================================================================

/// One row of the daily results feed.
///
/// The source feed labels these columns misleadingly; fields here carry the
/// true meaning: `ordered` is the commitment taken that day, `shipped` the
/// amount that left the dock, `produced` the amount manufactured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    pub date: NaiveDate,
    pub ordered: Decimal,
    pub shipped: Decimal,
    pub produced: Decimal,
}

impl DailyResult {
    pub fn new(date: NaiveDate, ordered: Decimal, shipped: Decimal, produced: Decimal) -> Self {
        Self { date, ordered, shipped, produced }
    }
}

/// Daily result rows as loaded from the results source.
///
/// Multiple rows may share a date; they are summed during aggregation, never
/// overwritten.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsTable {
    rows: Vec<DailyResult>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: DailyResult) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyResult> {
        self.rows.iter()
    }

    /// Most recent result date, used as the report's "last updated" stamp
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|r| r.date).max()
    }

    /// All (year, month) pairs with at least one result row
    pub fn periods(&self) -> impl Iterator<Item = PeriodKey> + '_ {
        self.rows.iter().map(|r| PeriodKey::of(r.date))
    }
}

// ============================================================================
// Periods
// ============================================================================

/// A (year, month) pair. Month 0 denotes the synthetic whole-year period.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub year: Year,
    pub month: MonthNumber,
}

impl PeriodKey {
    pub fn new(year: Year, month: MonthNumber) -> Self {
        Self { year, month }
    }

    /// Period containing a calendar date
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First calendar day of the month; `None` for the annual pseudo-period
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Last calendar day of the month, Gregorian-correct including leap years
    pub fn last_day(&self) -> Option<NaiveDate> {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.and_then(|d| d.pred_opt())
    }

    /// Number of calendar days in the month
    pub fn days_in_month(&self) -> Option<u32> {
        Some(self.last_day()?.day())
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

// ============================================================================
// PeriodRecord
// ============================================================================

/// Interpretation of the four chart series carried by a `PeriodRecord`.
///
/// Monthly records and the annual "0" record share one shape but not one
/// meaning: monthly series are per-calendar-day running totals, annual series
/// are 13 histogram slots (12 monthly totals plus a trailing TOTAL).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// One slot per calendar day of the month, cumulative within the period
    DailyCumulative,
    /// 12 monthly-total slots plus a 13th TOTAL slot
    MonthlyHistogram,
}

/// The aggregation unit: one per (year, month), plus one annual roll-up per
/// year stored under month key 0.
///
/// All series and `labels` are aligned 1:1 and share the same length: the
/// number of calendar days in the month for `DailyCumulative` records,
/// exactly 13 for `MonthlyHistogram` records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Budget target for the period
    pub budget: Decimal,
    /// Realized total (sum of shipped amounts)
    pub shipped: Decimal,
    /// Ordered-commitment total
    pub ordered: Decimal,
    /// Produced total
    pub produced: Decimal,
    /// Count of working days in the period
    pub working_days: u32,
    /// How the series below are to be read
    pub series_kind: SeriesKind,
    /// Display labels aligned with every series
    pub labels: Vec<String>,
    pub shipped_series: Vec<Decimal>,
    pub ordered_series: Vec<Decimal>,
    pub produced_series: Vec<Decimal>,
    /// Budget consumed-to-date assuming even spread across working days
    /// (monthly), or per-month budget targets plus TOTAL (annual)
    pub budget_series: Vec<Decimal>,
}

// ============================================================================
// Report
// ============================================================================

/// The full per-year, per-month record tree produced by one aggregation run.
///
/// Keys iterate in ascending order, so serializing the same report twice
/// yields identical output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    years: BTreeMap<Year, BTreeMap<MonthNumber, PeriodRecord>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PeriodKey, record: PeriodRecord) {
        self.years.entry(key.year).or_default().insert(key.month, record);
    }

    pub fn get(&self, year: Year, month: MonthNumber) -> Option<&PeriodRecord> {
        self.years.get(&year).and_then(|m| m.get(&month))
    }

    /// Years present, ascending
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.years.keys().copied()
    }

    /// Records of one year keyed by month number (0 = annual), ascending
    pub fn months_of(&self, year: Year) -> impl Iterator<Item = (MonthNumber, &PeriodRecord)> {
        self.years
            .get(&year)
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (*k, v)))
    }

    /// Total number of records, annual roll-ups included
    pub fn len(&self) -> usize {
        self.years.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

// ============================================================================
// Run metadata
// ============================================================================

/// Header metadata for one pipeline run: source freshness, row counts, and
/// the warnings collected at the loader boundaries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Most recent result date seen, if any results were loaded
    pub last_update: Option<NaiveDate>,
    pub holidays_loaded: usize,
    pub budget_rows: usize,
    pub result_rows: usize,
    /// Results rows excluded for unparseable dates
    pub results_dropped: usize,
    pub warnings: Vec<String>,
}

impl RunSummary {
    /// Display form of the freshness stamp, `DD/MM/YYYY` or "unknown"
    pub fn last_update_label(&self) -> String {
        self.last_update
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

// ============================================================================
// Month names
// ============================================================================

/// Display names for month keys, passed explicitly to the renderer.
///
/// Never read from process-wide locale state; a deployment wanting localized
/// names supplies its own mapping through configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthNames {
    /// Label for the annual pseudo-period (month key 0)
    pub full_year: String,
    /// Names for months 1-12 in order
    pub months: [String; 12],
}

impl Default for MonthNames {
    fn default() -> Self {
        Self {
            full_year: "Full Year".into(),
            months: [
                "January".into(),
                "February".into(),
                "March".into(),
                "April".into(),
                "May".into(),
                "June".into(),
                "July".into(),
                "August".into(),
                "September".into(),
                "October".into(),
                "November".into(),
                "December".into(),
            ],
        }
    }
}

impl MonthNames {
    /// Display name for a month key; falls back to the number for out-of-range keys
    pub fn label(&self, month: MonthNumber) -> String {
        match month {
            ANNUAL_KEY => self.full_year.clone(),
            1..=12 => self.months[(month - 1) as usize].clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render an aggregated report to the output format
    fn render(&self, report: &Report, summary: &RunSummary) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn weekend_is_not_a_working_day() {
        let holidays = HolidaySet::new();

        // 2024-03-04 is a Monday
        assert!(holidays.is_working_day(date(2024, 3, 4)));
        // 2024-03-09 / 2024-03-10 are Saturday and Sunday
        assert!(!holidays.is_working_day(date(2024, 3, 9)));
        assert!(!holidays.is_working_day(date(2024, 3, 10)));
    }

    #[test]
    fn holiday_overrides_weekday() {
        let holidays = HolidaySet::from_dates([date(2024, 3, 29)]);

        // Good Friday 2024 falls on a Friday
        assert!(!holidays.is_working_day(date(2024, 3, 29)));
        assert!(holidays.is_working_day(date(2024, 3, 28)));
    }

    #[test]
    fn holiday_on_weekend_stays_non_working() {
        let holidays = HolidaySet::from_dates([date(2024, 6, 1)]);
        assert!(!holidays.is_working_day(date(2024, 6, 1)));
    }

    #[test]
    fn budget_first_match_wins() {
        let mut budget = BudgetTable::new();
        budget.push(BudgetEntry::new(2024, 3, dec!(31000)));
        budget.push(BudgetEntry::new(2024, 3, dec!(99999)));

        assert_eq!(budget.target_for(2024, 3), Some(dec!(31000)));
        assert_eq!(budget.len(), 2);
    }

    #[test]
    fn budget_missing_period() {
        let budget = BudgetTable::new();
        assert_eq!(budget.target_for(2024, 1), None);
    }

    #[test]
    fn results_latest_date() {
        let mut results = ResultsTable::new();
        assert_eq!(results.latest_date(), None);

        results.push(DailyResult::new(date(2024, 3, 5), dec!(1), dec!(2), dec!(3)));
        results.push(DailyResult::new(date(2024, 3, 12), dec!(1), dec!(2), dec!(3)));
        results.push(DailyResult::new(date(2024, 2, 28), dec!(1), dec!(2), dec!(3)));

        assert_eq!(results.latest_date(), Some(date(2024, 3, 12)));
    }

    #[test]
    fn period_key_of_date() {
        assert_eq!(PeriodKey::of(date(2025, 11, 30)), PeriodKey::new(2025, 11));
    }

    #[test]
    fn month_span_regular_and_leap() {
        assert_eq!(PeriodKey::new(2024, 2).days_in_month(), Some(29));
        assert_eq!(PeriodKey::new(2025, 2).days_in_month(), Some(28));
        assert_eq!(PeriodKey::new(2024, 12).last_day(), Some(date(2024, 12, 31)));
        assert_eq!(PeriodKey::new(2024, 4).last_day(), Some(date(2024, 4, 30)));
    }

    #[test]
    fn annual_key_has_no_span() {
        let key = PeriodKey::new(2024, ANNUAL_KEY);
        assert_eq!(key.first_day(), None);
        assert_eq!(key.last_day(), None);
    }

    #[test]
    fn report_orders_keys() {
        let mut report = Report::new();
        let record = PeriodRecord {
            budget: Decimal::ZERO,
            shipped: Decimal::ZERO,
            ordered: Decimal::ZERO,
            produced: Decimal::ZERO,
            working_days: 0,
            series_kind: SeriesKind::DailyCumulative,
            labels: Vec::new(),
            shipped_series: Vec::new(),
            ordered_series: Vec::new(),
            produced_series: Vec::new(),
            budget_series: Vec::new(),
        };
        report.insert(PeriodKey::new(2025, 2), record.clone());
        report.insert(PeriodKey::new(2024, 7), record.clone());
        report.insert(PeriodKey::new(2024, ANNUAL_KEY), record);

        let years: Vec<_> = report.years().collect();
        assert_eq!(years, vec![2024, 2025]);

        let months_2024: Vec<_> = report.months_of(2024).map(|(m, _)| m).collect();
        assert_eq!(months_2024, vec![0, 7]);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn run_summary_last_update_label() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.last_update_label(), "unknown");

        summary.last_update = Some(date(2024, 3, 7));
        assert_eq!(summary.last_update_label(), "07/03/2024");
    }

    #[test]
    fn month_names_labels() {
        let names = MonthNames::default();
        assert_eq!(names.label(0), "Full Year");
        assert_eq!(names.label(1), "January");
        assert_eq!(names.label(12), "December");
        assert_eq!(names.label(13), "13");
    }
}
