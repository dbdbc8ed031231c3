//! Convergence trace rendering.
//!
//! Turns a [`ConvergenceHistory`] into something a person or a plotting
//! tool can read: an aligned table, CSV, or JSON.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ForestError, Result};
use crate::forest::ConvergenceHistory;

/// Output format of a convergence trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Aligned columns for the terminal
    #[default]
    Table,
    /// `iteration,best,mean` with a header row
    Csv,
    /// `{"best": [...], "mean": [...]}`
    Json,
}

impl FromStr for ReportFormat {
    type Err = ForestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ForestError::invalid_argument(
                "format",
                s,
                "'table', 'csv' or 'json'",
            )),
        }
    }
}

/// Render a history in the given format.
pub fn render(history: &ConvergenceHistory, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(table(history)),
        ReportFormat::Csv => Ok(csv(history)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(history)?),
    }
}

/// Write a rendered history to `path`.
pub fn write_to(history: &ConvergenceHistory, format: ReportFormat, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render(history, format)?.as_bytes())?;
    Ok(())
}

fn table(history: &ConvergenceHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>9}  {:>14}  {:>14}", "Iteration", "Best", "Mean");
    let _ = writeln!(out, "{}", "-".repeat(41));
    for (i, (best, mean)) in history.iter().enumerate() {
        let _ = writeln!(out, "{:>9}  {:>14.6e}  {:>14.6e}", i + 1, best, mean);
    }
    out
}

fn csv(history: &ConvergenceHistory) -> String {
    let mut out = String::from("iteration,best,mean\n");
    for (i, (best, mean)) in history.iter().enumerate() {
        let _ = writeln!(out, "{},{best},{mean}", i + 1);
    }
    out
}
