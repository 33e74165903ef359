//! Report - static HTML dashboard for regression test runs
//!
//! This crate turns the per-test reports of a regression run, together with
//! the historical results database, into a static HTML page with trend
//! sparklines, image comparisons and commit bisection information.

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Inputs
pub mod database;
pub mod loader;

// Presentation
pub mod formatter;
pub mod renderers;
pub mod utils;

pub use config::ReportConfig;
pub use database::{JsonDatabase, ResultsDatabase, TestHistory};
pub use error::{ReportError, Result};
pub use formatter::{format_value, Value};
pub use loader::{load_reports, parse_reports};
pub use renderers::html::{Body, HtmlDoc};
pub use renderers::{DashboardRenderer, HtmlComponents, TestRunRenderer};
pub use types::{Commit, ImageTest, Measurement, Series, Status, TestReport, TestRun};

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// File name of an archived copy of a report rendered at `created`,
/// matching the history pattern of the dashboard
pub fn archive_name(created: DateTime<Local>) -> String {
    format!("report-{}", created.format("%Y-%m-%dT%H_%M_%S"))
}

/// Render the dashboard of `reports` into `output_dir` as `<basename>.html`
/// and, when `archive` is set, also as a dated snapshot picked up by later
/// reports. Returns the written pages.
pub fn render_report(
    output_dir: &Path,
    basename: &str,
    reports: &[TestReport],
    db: &dyn ResultsDatabase,
    config: ReportConfig,
    archive: bool,
) -> Result<Vec<PathBuf>> {
    let renderer = DashboardRenderer::new(output_dir, reports, db).with_config(config);

    let page = renderer.save_html(basename)?;
    let mut written = vec![page.clone()];
    if archive {
        let snapshot = output_dir.join(format!("{}.html", archive_name(renderer.created())));
        std::fs::copy(&page, &snapshot)?;
        tracing::info!(path = %snapshot.display(), "archived report");
        written.push(snapshot);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_archive_name_matches_history_pattern() {
        let created = Local.with_ymd_and_hms(2023, 1, 15, 9, 5, 3).unwrap();
        let name = format!("{}.html", archive_name(created));
        assert_eq!(name, "report-2023-01-15T09_05_03.html");
        assert!(glob::Pattern::new(renderers::html::HISTORY_PATTERN)
            .unwrap()
            .matches(&name));
    }

    #[test]
    fn test_error_types() {
        let error = ReportError::invalid_report("volume", "missing module");
        assert!(error.to_string().contains("Invalid report 'volume'"));

        let error = ReportError::database("locked");
        assert!(error.to_string().contains("Database error"));
    }
}
