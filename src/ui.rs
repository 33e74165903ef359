//! Terminal output of the commands

use colored::Colorize;
use report::TestReport;
use std::path::Path;

/// A step of the render pipeline
pub fn stage(message: &str) {
    println!("{} {}", "→".cyan(), message.bright_white());
}

/// `12 tests, 2 failing, history for 10 tests`
pub fn summary(reports: &[TestReport], histories: usize) -> String {
    let failing = reports.iter().filter(|r| !r.is_ok()).count();
    format!("{} tests, {} failing, history for {} tests", reports.len(), failing, histories)
}

/// `module/name: check, check`
pub fn failing_test(report: &TestReport) -> String {
    format!("{}/{}: {}", report.module, report.name, report.failures.join(", "))
}

/// Counts of the run; with `details` also every failing test and its
/// failed checks
pub fn run_summary(reports: &[TestReport], histories: usize, details: bool) {
    let line = summary(reports, histories);
    if reports.iter().all(TestReport::is_ok) {
        println!("{}", line.green());
    } else {
        println!("{}", line.red().bold());
    }

    if details {
        for report in reports.iter().filter(|r| !r.is_ok()) {
            println!("  {} {}", "✗".red(), failing_test(report));
        }
    }
}

pub fn empty_run() {
    println!("{}", "No test reports found, the dashboard will be empty".yellow());
}

pub fn page_written(path: &Path) {
    println!("{} {}", "✓".green(), path.display().to_string().green());
}

pub fn config_written(path: &Path) {
    println!(
        "{} Created {}, pass it to `regress-report render --config`",
        "✓".green(),
        path.display()
    );
}

pub fn config_kept(path: &Path) {
    let message = format!("{} already exists, use --force to overwrite it", path.display());
    println!("{}", message.yellow());
}
