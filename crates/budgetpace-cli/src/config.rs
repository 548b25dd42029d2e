//! TOML configuration for the budgetpace CLI.
//!
//! Everything has a default, so the tool runs without any file; a config
//! supplies source paths, the output location, and the report presentation
//! (title, locale, currency, month display names). CLI flags override the
//! file.

use anyhow::{bail, Context, Result};
use budgetpace_core::MonthNames;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sources: Sources,
    pub output: Output,
    pub report: ReportSettings,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sources {
    /// Holiday calendar workbook
    pub holidays: PathBuf,
    /// Monthly budget target workbook
    pub budget: PathBuf,
    /// Daily results feed workbook
    pub results: PathBuf,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            holidays: "holidays.xlsx".into(),
            budget: "budget.xlsx".into(),
            results: "results.xls".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Output {
    pub path: PathBuf,
}

impl Default for Output {
    fn default() -> Self {
        Self {
            path: "dashboard.html".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    pub title: String,
    /// BCP-47 tag for client-side number formatting
    pub locale: String,
    /// ISO 4217 currency code
    pub currency: String,
    /// Label for the whole-year pseudo-period
    pub full_year_label: String,
    /// Exactly 12 month display names, January first
    pub month_names: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        let defaults = MonthNames::default();
        Self {
            title: "Budget Dashboard".into(),
            locale: "en-US".into(),
            currency: "EUR".into(),
            full_year_label: defaults.full_year.clone(),
            month_names: defaults.months.to_vec(),
        }
    }
}

impl Config {
    /// Load a config file, or fall back to defaults when none is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("cannot parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.report.month_names.len() != 12 {
            bail!(
                "report.month_names must list exactly 12 names, got {}",
                self.report.month_names.len()
            );
        }
        Ok(())
    }

    /// Month-name mapping for the renderer.
    pub fn month_names(&self) -> MonthNames {
        let mut names = MonthNames {
            full_year: self.report.full_year_label.clone(),
            ..MonthNames::default()
        };
        for (slot, name) in names.months.iter_mut().zip(&self.report.month_names) {
            slot.clone_from(name);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn load(toml_text: &str) -> Result<Config> {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        write!(file, "{toml_text}").unwrap();
        Config::load_or_default(Some(file.path()))
    }

    #[test]
    fn defaults_without_a_file() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.output.path, PathBuf::from("dashboard.html"));
        assert_eq!(config.report.currency, "EUR");
        assert_eq!(config.report.month_names.len(), 12);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = load(
            r#"
[sources]
results = "/mnt/kpi/results.xls"

[report]
title = "Plant KPI"
"#,
        )
        .unwrap();

        assert_eq!(config.sources.results, PathBuf::from("/mnt/kpi/results.xls"));
        assert_eq!(config.sources.budget, PathBuf::from("budget.xlsx"));
        assert_eq!(config.report.title, "Plant KPI");
        assert_eq!(config.report.locale, "en-US");
    }

    #[test]
    fn localized_month_names() {
        let config = load(
            r#"
[report]
locale = "fr-FR"
full_year_label = "Annee Entiere"
month_names = [
    "Janvier", "Fevrier", "Mars", "Avril", "Mai", "Juin",
    "Juillet", "Aout", "Septembre", "Octobre", "Novembre", "Decembre",
]
"#,
        )
        .unwrap();

        let names = config.month_names();
        assert_eq!(names.full_year, "Annee Entiere");
        assert_eq!(names.label(1), "Janvier");
        assert_eq!(names.label(12), "Decembre");
    }

    #[test]
    fn wrong_month_count_is_rejected() {
        let result = load(
            r#"
[report]
month_names = ["Jan", "Feb"]
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load(
            r#"
[sources]
holydays = "typo.xlsx"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Config::load_or_default(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }
}
