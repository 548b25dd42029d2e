//! Diagnostic probe for the results source.
//!
//! Remote-share access failures are the usual reason a run comes back empty,
//! and "the file is there but the parse fails" needs different fixing than
//! "the share is unreachable". The probe runs four escalating checks against
//! one path and reports each:
//!
//! 1. existence (metadata)
//! 2. raw byte read
//! 3. copy to a local temp file
//! 4. full tabular parse through the production loader
//!
//! When the file does not exist the remaining checks are skipped and the
//! parent directory is listed if possible, which separates "bad filename"
//! from "no share access". This tool is for troubleshooting only; the
//! generate pipeline never depends on it.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Outcome of a single probe check
#[derive(Clone, Debug)]
pub struct ProbeStep {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

/// Full probe outcome for one path
#[derive(Clone, Debug)]
pub struct ProbeReport {
    pub path: PathBuf,
    pub steps: Vec<ProbeStep>,
    /// Parent directory listing, attempted only when the file is missing
    pub dir_listing: Option<Result<Vec<String>, String>>,
}

impl ProbeReport {
    /// True when every executed check passed
    pub fn all_passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    /// Write the human-readable report
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rule = "-".repeat(60);
        writeln!(out, "{rule}")?;
        writeln!(out, "PROBE: testing access to {}", self.path.display())?;
        writeln!(out, "{rule}")?;

        for (idx, step) in self.steps.iter().enumerate() {
            let status = if step.passed { "PASS" } else { "FAIL" };
            writeln!(out, "{}. {:<10} {} ({})", idx + 1, step.name, status, step.detail)?;
        }

        if self.steps.len() < 4 {
            writeln!(out, "skipping remaining checks: file does not exist")?;
        }

        match &self.dir_listing {
            Some(Ok(entries)) => {
                writeln!(out, "parent directory contents ({} entries):", entries.len())?;
                for entry in entries {
                    writeln!(out, "  {entry}")?;
                }
            }
            Some(Err(reason)) => {
                writeln!(out, "cannot list parent directory: {reason}")?;
            }
            None => {}
        }

        writeln!(out, "{rule}")?;
        Ok(())
    }
}

/// Run the escalating checks against one path.
pub fn run_probe(path: &Path) -> ProbeReport {
    let mut steps = Vec::new();

    let exists = match fs::metadata(path) {
        Ok(meta) => {
            steps.push(ProbeStep {
                name: "exists",
                passed: true,
                detail: format!("file is {} bytes", meta.len()),
            });
            true
        }
        Err(err) => {
            steps.push(ProbeStep {
                name: "exists",
                passed: false,
                detail: err.to_string(),
            });
            false
        }
    };

    if !exists {
        return ProbeReport {
            path: path.to_path_buf(),
            steps,
            dir_listing: Some(list_parent(path)),
        };
    }

    steps.push(raw_read_step(path));
    steps.push(copy_step(path));
    steps.push(parse_step(path));

    ProbeReport {
        path: path.to_path_buf(),
        steps,
        dir_listing: None,
    }
}

fn raw_read_step(path: &Path) -> ProbeStep {
    let result = fs::File::open(path).and_then(|mut file| {
        let mut header = [0u8; 10];
        let read = file.read(&mut header)?;
        Ok(read)
    });
    match result {
        Ok(read) => ProbeStep {
            name: "raw read",
            passed: true,
            detail: format!("read {read} bytes"),
        },
        Err(err) => ProbeStep {
            name: "raw read",
            passed: false,
            detail: err.to_string(),
        },
    }
}

fn copy_step(path: &Path) -> ProbeStep {
    let target = std::env::temp_dir().join(format!("budgetpace-probe-{}.tmp", std::process::id()));
    let result = fs::copy(path, &target);
    let _ = fs::remove_file(&target);
    match result {
        Ok(bytes) => ProbeStep {
            name: "copy",
            passed: true,
            detail: format!("copied {bytes} bytes to {}", target.display()),
        },
        Err(err) => ProbeStep {
            name: "copy",
            passed: false,
            detail: err.to_string(),
        },
    }
}

fn parse_step(path: &Path) -> ProbeStep {
    match budgetpace_ingest::load_results(path) {
        Ok(load) => ProbeStep {
            name: "parse",
            passed: true,
            detail: format!("{} rows, {} dropped", load.table.len(), load.dropped),
        },
        Err(err) => ProbeStep {
            name: "parse",
            passed: false,
            detail: err.to_string(),
        },
    }
}

fn list_parent(path: &Path) -> Result<Vec<String>, String> {
    let parent = path.parent().ok_or_else(|| "path has no parent".to_string())?;
    let entries = fs::read_dir(parent).map_err(|e| e.to_string())?;
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}
