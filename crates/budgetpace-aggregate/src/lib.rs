//! # budgetpace-aggregate
//!
//! Period aggregation for budgetpace: turns the three source tables into the
//! per-year, per-month `PeriodRecord` tree consumed by the report renderer.
//!
//! # Algorithm
//!
//! 1. Identify every (year, month) present in the budget table or the
//!    results feed; only those periods get a record.
//! 2. For each period, walk its full calendar span in order, building the
//!    working-day count, the budget-pacing curve, and the three cumulative
//!    daily series. Every calendar day occupies exactly one slot, whether or
//!    not any result row exists for it.
//! 3. For each year, roll the monthly records into a 13-slot histogram
//!    record (months 01-12 plus TOTAL) stored under month key 0.
//!
//! Aggregation is total: missing sources mean empty tables, which mean zero
//! targets and zero totals, never an error. A month with no working days has
//! a zero daily target rather than a division by zero.

use budgetpace_core::{
    BudgetTable, HolidaySet, PeriodKey, PeriodRecord, Report, ResultsTable, SeriesKind, Year,
    ANNUAL_KEY, TOTAL_LABEL,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Per-date sums of the three result dimensions.
///
/// Multiple feed rows for one date collapse into one of these; amounts are
/// summed, not overwritten.
#[derive(Clone, Copy, Debug, Default)]
struct DayTotals {
    ordered: Decimal,
    shipped: Decimal,
    produced: Decimal,
}

/// Build the full report tree from the three loaded sources.
pub fn build_report(
    holidays: &HolidaySet,
    budget: &BudgetTable,
    results: &ResultsTable,
) -> Report {
    let mut periods: BTreeSet<PeriodKey> = budget.periods().collect();
    periods.extend(results.periods());
    debug!(periods = periods.len(), "identified distinct periods");

    let daily = daily_totals(results);

    let mut report = Report::new();
    for key in &periods {
        let target = budget.target_for(key.year, key.month).unwrap_or(Decimal::ZERO);
        if let Some(record) = month_record(holidays, target, &daily, *key) {
            report.insert(*key, record);
        }
    }

    let years: Vec<Year> = report.years().collect();
    for year in years {
        // an existing roll-up is never rebuilt
        if report.get(year, ANNUAL_KEY).is_some() {
            continue;
        }
        let record = annual_record(&report, year);
        report.insert(PeriodKey::new(year, ANNUAL_KEY), record);
    }

    report
}

/// Group the results feed by date, summing each dimension.
fn daily_totals(results: &ResultsTable) -> BTreeMap<NaiveDate, DayTotals> {
    let mut daily: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    for row in results.iter() {
        let entry = daily.entry(row.date).or_default();
        entry.ordered += row.ordered;
        entry.shipped += row.shipped;
        entry.produced += row.produced;
    }
    daily
}

/// Build one monthly record covering the period's full calendar span.
///
/// Returns `None` only for keys without a valid calendar span (month 0 or
/// out of range), which the period discovery above never produces.
fn month_record(
    holidays: &HolidaySet,
    budget_amount: Decimal,
    daily: &BTreeMap<NaiveDate, DayTotals>,
    key: PeriodKey,
) -> Option<PeriodRecord> {
    let first = key.first_day()?;
    let last = key.last_day()?;
    let span = || first.iter_days().take_while(move |d| *d <= last);

    let working_days = span().filter(|d| holidays.is_working_day(*d)).count() as u32;

    // zero working days means a zero target per day, not a division by zero
    let daily_target = if working_days == 0 {
        Decimal::ZERO
    } else {
        budget_amount / Decimal::from(working_days)
    };

    let day_count = span().count();
    let mut labels = Vec::with_capacity(day_count);
    let mut shipped_series = Vec::with_capacity(day_count);
    let mut ordered_series = Vec::with_capacity(day_count);
    let mut produced_series = Vec::with_capacity(day_count);
    let mut budget_series = Vec::with_capacity(day_count);

    let mut shipped_run = Decimal::ZERO;
    let mut ordered_run = Decimal::ZERO;
    let mut produced_run = Decimal::ZERO;
    let mut budget_run = Decimal::ZERO;

    for day in span() {
        labels.push(day.format("%d/%m").to_string());

        // the pacing curve climbs on working days and plateaus otherwise
        if holidays.is_working_day(day) {
            budget_run += daily_target;
        }
        budget_series.push(budget_run);

        let totals = daily.get(&day).copied().unwrap_or_default();
        shipped_run += totals.shipped;
        ordered_run += totals.ordered;
        produced_run += totals.produced;
        shipped_series.push(shipped_run);
        ordered_series.push(ordered_run);
        produced_series.push(produced_run);
    }

    Some(PeriodRecord {
        budget: budget_amount,
        shipped: shipped_run,
        ordered: ordered_run,
        produced: produced_run,
        working_days,
        series_kind: SeriesKind::DailyCumulative,
        labels,
        shipped_series,
        ordered_series,
        produced_series,
        budget_series,
    })
}

/// Roll one year's monthly records into the 13-slot annual histogram record.
///
/// Every year gets exactly 12 monthly slots in order; a month without a
/// record contributes zeros but keeps its slot. The 13th slot is the TOTAL
/// across all twelve.
fn annual_record(report: &Report, year: Year) -> PeriodRecord {
    let mut budget_total = Decimal::ZERO;
    let mut shipped_total = Decimal::ZERO;
    let mut ordered_total = Decimal::ZERO;
    let mut produced_total = Decimal::ZERO;
    let mut working_days_total = 0u32;

    let mut labels = Vec::with_capacity(13);
    let mut budget_series = Vec::with_capacity(13);
    let mut shipped_series = Vec::with_capacity(13);
    let mut ordered_series = Vec::with_capacity(13);
    let mut produced_series = Vec::with_capacity(13);

    for month in 1..=12 {
        labels.push(format!("{month:02}"));

        let mut slot = (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        if let Some(record) = report.get(year, month) {
            budget_total += record.budget;
            shipped_total += record.shipped;
            ordered_total += record.ordered;
            produced_total += record.produced;
            working_days_total += record.working_days;
            slot = (record.budget, record.shipped, record.ordered, record.produced);
        }

        budget_series.push(slot.0);
        shipped_series.push(slot.1);
        ordered_series.push(slot.2);
        produced_series.push(slot.3);
    }

    labels.push(TOTAL_LABEL.to_string());
    budget_series.push(budget_total);
    shipped_series.push(shipped_total);
    ordered_series.push(ordered_total);
    produced_series.push(produced_total);

    PeriodRecord {
        budget: budget_total,
        shipped: shipped_total,
        ordered: ordered_total,
        produced: produced_total,
        working_days: working_days_total,
        series_kind: SeriesKind::MonthlyHistogram,
        labels,
        shipped_series,
        ordered_series,
        produced_series,
        budget_series,
    }
}
