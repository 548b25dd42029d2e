//! budgetpace CLI - Budget-vs-actual dashboard generator
//!
//! Loads the holiday, budget, and results workbooks, aggregates them into
//! per-period records, and writes one standalone HTML dashboard. A source
//! that cannot be read becomes a warning in the dashboard, never a failed
//! run; the only fatal errors are a broken config file or an unwritable
//! output path.

mod config;
mod probe;

use anyhow::{Context, Result};
use budgetpace_core::{BudgetTable, HolidaySet, Renderer, RunSummary};
use budgetpace_ingest::ResultsLoad;
use budgetpace_render::DashboardRenderer;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;

#[derive(Parser)]
#[command(name = "budgetpace")]
#[command(author, version, about = "Budget-vs-actual dashboard generator", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the three sources, aggregate, and write the dashboard
    Generate {
        /// Holiday calendar workbook (overrides config)
        #[arg(long, value_name = "FILE")]
        holidays: Option<PathBuf>,

        /// Budget target workbook (overrides config)
        #[arg(long, value_name = "FILE")]
        budget: Option<PathBuf>,

        /// Daily results workbook (overrides config)
        #[arg(long, value_name = "FILE")]
        results: Option<PathBuf>,

        /// Output file (overrides config)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Run escalating access checks against the results source
    Probe {
        /// Path to probe (defaults to the configured results source)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            holidays,
            budget,
            results,
            output,
        } => {
            generate(&config, holidays, budget, results, output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Probe { path } => {
            let target = path.unwrap_or_else(|| config.sources.results.clone());
            let report = probe::run_probe(&target);
            report.write_to(&mut std::io::stdout())?;
            if report.all_passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Run the full pipeline: load, aggregate, render, write.
fn generate(
    config: &Config,
    holidays_path: Option<PathBuf>,
    budget_path: Option<PathBuf>,
    results_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let holidays_path = holidays_path.unwrap_or_else(|| config.sources.holidays.clone());
    let budget_path = budget_path.unwrap_or_else(|| config.sources.budget.clone());
    let results_path = results_path.unwrap_or_else(|| config.sources.results.clone());
    let output_path = output_path.unwrap_or_else(|| config.output.path.clone());

    let mut warnings = Vec::new();

    let holidays = match budgetpace_ingest::load_holidays(&holidays_path) {
        Ok(holidays) => holidays,
        Err(err) => {
            let message = format!("could not read the holiday file: {err}");
            warn!("{message}");
            warnings.push(message);
            HolidaySet::default()
        }
    };

    let budget = match budgetpace_ingest::load_budget(&budget_path) {
        Ok(budget) => budget,
        Err(err) => {
            let message = format!("could not read the budget file: {err}");
            warn!("{message}");
            warnings.push(message);
            BudgetTable::default()
        }
    };

    let ResultsLoad { table: results, dropped } =
        match budgetpace_ingest::load_results(&results_path) {
            Ok(load) => load,
            Err(err) => {
                let message = format!("could not read the results file: {err}");
                warn!("{message}");
                warnings.push(message);
                ResultsLoad::default()
            }
        };

    let summary = RunSummary {
        last_update: results.latest_date(),
        holidays_loaded: holidays.len(),
        budget_rows: budget.len(),
        result_rows: results.len(),
        results_dropped: dropped,
        warnings,
    };

    let report = budgetpace_aggregate::build_report(&holidays, &budget, &results);
    info!(
        periods = report.len(),
        last_update = %summary.last_update_label(),
        "aggregation complete"
    );

    let renderer = DashboardRenderer::new()
        .title(&config.report.title)
        .locale(&config.report.locale)
        .currency(&config.report.currency)
        .month_names(config.month_names());
    let html = renderer.render(&report, &summary)?;

    std::fs::write(&output_path, html)
        .with_context(|| format!("cannot write dashboard to {}", output_path.display()))?;
    info!(output = %output_path.display(), "dashboard written");
    println!("Dashboard written to {}", output_path.display());

    Ok(())
}
