//! Shared factories for the report integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, TimeZone};
use report::{Commit, ImageTest, TestReport, TestRun};
use std::path::Path;

/// Fixed render time used by all tests
pub fn created() -> DateTime<Local> {
    Local.with_ymd_and_hms(2023, 1, 20, 18, 0, 0).unwrap()
}

/// Report of a test whose output lives in `<base>/<module>/<name>`, with a
/// log file written to disk
pub fn create_report(
    base: &Path,
    module: &str,
    name: &str,
    failures: Vec<&str>,
    images: Vec<(&str, f64)>,
) -> TestReport {
    let outputdir = base.join(module).join(name);
    std::fs::create_dir_all(&outputdir).unwrap();
    std::fs::write(outputdir.join("log.txt"), "Info: loading workspace\nInfo: done\n").unwrap();

    TestReport {
        name: name.to_string(),
        module: module.to_string(),
        date: created() - Duration::minutes(30),
        elapsed_time: 3.25,
        image_tests: images
            .into_iter()
            .map(|(image, difference)| ImageTest::new(image, difference))
            .collect(),
        failures: failures.into_iter().map(String::from).collect(),
        successes: vec!["returncode".to_string()],
        outputdir,
        log: "log.txt".into(),
        screenshot: "screenshot.png".into(),
        path: Some(format!("/inviwo/modules/{}/tests/regression/{}", module, name)),
        command: vec!["inviwo".to_string(), "--quit".to_string()],
        returncode: Some(0),
        missing_imgs: vec![],
        missing_refs: vec![],
        output: Some(String::new()),
        errors: None,
    }
}

pub fn create_run(days_ago: i64, hash: &str, failures: usize) -> TestRun {
    let date = created() - Duration::days(days_ago);
    TestRun {
        created: date,
        commit: Commit {
            hash: hash.to_string(),
            author: "Jane Doe".to_string(),
            message: format!("Change {}", hash),
            date,
            server: "https://github.com/inviwo/inviwo".to_string(),
        },
        failures,
    }
}

/// Empty archived report files in `dir`
pub fn create_history(dir: &Path, names: &[String]) {
    for name in names {
        std::fs::write(dir.join(name), "<html></html>").unwrap();
    }
}
