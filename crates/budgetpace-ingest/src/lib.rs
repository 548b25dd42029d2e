//! # budgetpace-ingest
//!
//! Source readers for the budgetpace reporting pipeline.
//!
//! Three tabular sources feed a run, each loaded independently:
//! - Holiday calendar (`load_holidays`): one date column, header row skipped
//! - Monthly budget targets (`load_budget`): month, year, name, amount
//! - Daily results feed (`load_results`): date, unused, ordered, shipped, produced
//!
//! Workbooks are opened format-agnostically, so both the legacy `.xls`
//! results feed and the `.xlsx` planning files load through the same path.
//!
//! Every loader returns an explicit `Result`; a failure means the whole
//! source is unavailable and is turned into a warning plus an empty table by
//! the caller, never a crashed run. Row-level defects inside the results feed
//! (unparseable dates) are dropped and counted rather than propagated.

pub mod budget;
pub mod holidays;
pub mod results;
mod sheet;

pub use budget::load_budget;
pub use holidays::load_holidays;
pub use results::{load_results, ResultsLoad};

use std::path::PathBuf;
use thiserror::Error;

/// Source loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open workbook {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {} contains no worksheets", .path.display())]
    NoWorksheet { path: PathBuf },

    #[error("{}: {message}", .path.display())]
    Schema { path: PathBuf, message: String },
}
