use crate::error::{ReportError, Result};
use crate::types::TestReport;
use serde_json::{Map, Value};
use std::path::Path;

/// Load the test reports of a run from a JSON object mapping test name to
/// report. The order of the file is kept.
pub fn load_reports<P: AsRef<Path>>(path: P) -> Result<Vec<TestReport>> {
    let content = std::fs::read_to_string(path)?;
    parse_reports(&content)
}

/// Parse a JSON object mapping test name to report
pub fn parse_reports(content: &str) -> Result<Vec<TestReport>> {
    let entries: Map<String, Value> = serde_json::from_str(content)?;

    let mut reports = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let mut report: TestReport = serde_json::from_value(value)
            .map_err(|e| ReportError::invalid_report(key.clone(), e.to_string()))?;
        if report.name.is_empty() {
            report.name = key;
        }
        reports.push(report);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(module: &str) -> String {
        format!(
            r#"{{
                "module": "{}",
                "date": "2023-01-15T08:30:00+00:00",
                "elapsed_time": 2.5,
                "outputdir": "/out/{}",
                "log": "log.txt",
                "screenshot": "screenshot.png"
            }}"#,
            module, module
        )
    }

    #[test]
    fn test_order_is_preserved() {
        let json = format!(
            r#"{{ "zeta": {}, "alpha": {}, "mid": {} }}"#,
            entry("base"),
            entry("opengl"),
            entry("python3")
        );

        let reports = parse_reports(&json).unwrap();
        let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(reports[1].module, "opengl");
        assert!(reports[0].failures.is_empty());
        assert_eq!(reports[0].returncode, None);
    }

    #[test]
    fn test_invalid_entry_names_the_test() {
        let json = r#"{ "broken": { "module": "base" } }"#;
        let err = parse_reports(json).unwrap_err();
        assert!(matches!(err, ReportError::InvalidReport { ref name, .. } if name == "broken"));
    }
}
