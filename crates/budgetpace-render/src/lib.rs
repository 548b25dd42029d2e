//! # budgetpace-render
//!
//! Report assembly and rendering backends for budgetpace.
//!
//! This crate provides:
//! - The report data assembler: the per-year, per-month record tree
//!   serialized into the nested mapping embedded in the dashboard
//! - The standalone interactive HTML dashboard renderer
//!
//! ## Example
//!
//! ```rust,ignore
//! use budgetpace_core::{Renderer, RunSummary};
//! use budgetpace_render::DashboardRenderer;
//!
//! let renderer = DashboardRenderer::new().title("Plant KPI");
//! let html = renderer.render(&report, &summary)?;
//! std::fs::write("dashboard.html", html)?;
//! ```

pub mod data;
pub mod dashboard;

pub use dashboard::{DashboardRenderer, DashboardTheme};
pub use data::{assemble, DashboardData, PeriodData};
