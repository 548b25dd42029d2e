//! Report data assembler.
//!
//! Pure serialization: walks the aggregated `Report` and produces the nested
//! string-keyed mapping (`year -> month-key -> period object`) that gets
//! embedded as literal data in the rendered dashboard. Amounts leave their
//! exact `Decimal` form here, at the serialization boundary, and nowhere
//! else.

use budgetpace_core::{PeriodRecord, Report, SeriesKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Serialized form of one period record, as consumed by the dashboard script.
#[derive(Clone, Debug, Serialize)]
pub struct PeriodData {
    pub budget: f64,
    pub shipped: f64,
    pub ordered: f64,
    pub produced: f64,
    pub working_days: u32,
    /// How the chart series are to be read; the script switches between the
    /// cumulative line chart and the 13-slot histogram on this tag
    pub series_kind: SeriesKind,
    pub labels: Vec<String>,
    pub chart_shipped: Vec<f64>,
    pub chart_ordered: Vec<f64>,
    pub chart_produced: Vec<f64>,
    pub chart_budget: Vec<f64>,
}

/// The embeddable record tree: year -> month-key ("0" = annual) -> period.
pub type DashboardData = BTreeMap<String, BTreeMap<String, PeriodData>>;

/// Serialize the report tree into its embeddable form.
///
/// Keys become strings; iteration order is the underlying map order, so the
/// same report always assembles into the same structure.
pub fn assemble(report: &Report) -> DashboardData {
    let mut data = DashboardData::new();
    for year in report.years() {
        let months = data.entry(year.to_string()).or_default();
        for (month, record) in report.months_of(year) {
            months.insert(month.to_string(), period_data(record));
        }
    }
    data
}

fn period_data(record: &PeriodRecord) -> PeriodData {
    PeriodData {
        budget: to_f64(record.budget),
        shipped: to_f64(record.shipped),
        ordered: to_f64(record.ordered),
        produced: to_f64(record.produced),
        working_days: record.working_days,
        series_kind: record.series_kind,
        labels: record.labels.clone(),
        chart_shipped: series_f64(&record.shipped_series),
        chart_ordered: series_f64(&record.ordered_series),
        chart_produced: series_f64(&record.produced_series),
        chart_budget: series_f64(&record.budget_series),
    }
}

fn series_f64(series: &[Decimal]) -> Vec<f64> {
    series.iter().copied().map(to_f64).collect()
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
