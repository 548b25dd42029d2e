//! Integration tests for HTML dashboard rendering

use budgetpace_aggregate::build_report;
use budgetpace_core::{
    BudgetEntry, BudgetTable, DailyResult, HolidaySet, MonthNames, Renderer, ResultsTable,
    RunSummary,
};
use budgetpace_render::DashboardRenderer;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_inputs() -> (HolidaySet, BudgetTable, ResultsTable) {
    let holidays = HolidaySet::from_dates([date(2024, 3, 29)]);

    let mut budget = BudgetTable::new();
    budget.push(BudgetEntry::new(2024, 3, dec!(31000)));
    budget.push(BudgetEntry::new(2025, 1, dec!(35000)));

    let mut results = ResultsTable::new();
    results.push(DailyResult::new(date(2024, 3, 1), dec!(900), dec!(1000), dec!(1100)));
    results.push(DailyResult::new(date(2024, 3, 4), dec!(500), dec!(700), dec!(600)));
    results.push(DailyResult::new(date(2025, 1, 7), dec!(250), dec!(300), dec!(280)));

    (holidays, budget, results)
}

fn sample_summary(results: &ResultsTable) -> RunSummary {
    RunSummary {
        last_update: results.latest_date(),
        holidays_loaded: 1,
        budget_rows: 2,
        result_rows: results.len(),
        results_dropped: 0,
        warnings: Vec::new(),
    }
}

#[test]
fn render_complete_dashboard() {
    let (holidays, budget, results) = sample_inputs();
    let report = build_report(&holidays, &budget, &results);
    let summary = sample_summary(&results);

    let renderer = DashboardRenderer::new().title("Plant KPI");
    let html = renderer.render(&report, &summary).expect("render");

    // standalone document with the record tree embedded
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("const DB_DATA = "));
    assert!(html.contains("<title>Plant KPI</title>"));

    // both years, their months, and the annual roll-ups are in the data
    assert!(html.contains(r#""2024""#));
    assert!(html.contains(r#""2025""#));
    assert!(html.contains(r#""series_kind":"monthly_histogram""#));
    assert!(html.contains(r#""series_kind":"daily_cumulative""#));

    // the three views and their charts
    assert!(html.contains(r#"id="view-home""#));
    assert!(html.contains(r#"id="view-dashboard""#));
    assert!(html.contains(r#"id="view-comparison""#));
    assert!(html.contains(r#"id="main-chart""#));
    assert!(html.contains(r#"id="comp-chart""#));

    // remote assets: charting script and web font only
    assert!(html.contains("cdn.jsdelivr.net/npm/chart.js"));
    assert!(html.contains("fonts.googleapis.com"));

    // run metadata in the home footer
    assert!(html.contains("07/01/2025"));
    assert!(html.contains("Budget rows: <strong>2</strong>"));

    // a clean run renders no banner
    assert!(!html.contains(r#"class="warning-banner""#));
}

#[test]
fn warnings_render_as_a_single_banner() {
    let report = build_report(&HolidaySet::new(), &BudgetTable::new(), &ResultsTable::new());
    let summary = RunSummary {
        warnings: vec![
            "could not read the budget file: access denied".to_string(),
            "could not read the results file: not found".to_string(),
        ],
        ..RunSummary::default()
    };

    let html = DashboardRenderer::new().render(&report, &summary).expect("render");

    assert_eq!(html.matches(r#"class="warning-banner""#).count(), 1);
    assert!(html.contains("could not read the budget file: access denied"));
    assert!(html.contains("<br>"));
    // no data, but still a valid document with an unknown freshness stamp
    assert!(html.contains("Last updated: <strong>unknown</strong>"));
}

#[test]
fn month_names_mapping_is_injected() {
    let (holidays, budget, results) = sample_inputs();
    let report = build_report(&holidays, &budget, &results);
    let summary = sample_summary(&results);

    let mut names = MonthNames::default();
    names.full_year = "Annee Entiere".to_string();
    names.months[0] = "Janvier".to_string();

    let html = DashboardRenderer::new()
        .month_names(names)
        .locale("fr-FR")
        .currency("EUR")
        .render(&report, &summary)
        .expect("render");

    assert!(html.contains("Annee Entiere"));
    assert!(html.contains("Janvier"));
    assert!(html.contains(r#"const LOCALE = "fr-FR""#));
    assert!(html.contains(r#"const CURRENCY = "EUR""#));
}

#[test]
fn title_is_escaped() {
    let report = build_report(&HolidaySet::new(), &BudgetTable::new(), &ResultsTable::new());
    let summary = RunSummary::default();

    let html = DashboardRenderer::new()
        .title("KPI <Plant & Co>")
        .render(&report, &summary)
        .expect("render");

    assert!(html.contains("KPI &lt;Plant &amp; Co&gt;"));
    assert!(!html.contains("<Plant"));
}
