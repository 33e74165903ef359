//! Access to the historical results database
//!
//! The renderers only read from the database through [`ResultsDatabase`].
//! [`JsonDatabase`] answers the queries from a JSON snapshot exported by the
//! test driver.

use crate::error::{ReportError, Result};
use crate::types::{Series, TestRun};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Queries the renderers issue against the results history
pub trait ResultsDatabase {
    /// Most recent run of a test
    fn last_test_run(&self, module: &str, name: &str) -> Result<Option<TestRun>>;

    /// Last passing run before, and first failing run of, the current
    /// failure streak
    fn last_success_first_failure(
        &self,
        module: &str,
        name: &str,
    ) -> Result<(Option<TestRun>, Option<TestRun>)>;

    /// A named series of a test, e.g. `elapsed_time`
    fn series(&self, module: &str, name: &str, series: &str) -> Result<Option<Series>>;
}

/// History of a single test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestHistory {
    pub module: String,
    pub name: String,
    #[serde(default)]
    pub runs: Vec<TestRun>,
    #[serde(default)]
    pub series: HashMap<String, Series>,
}

impl TestHistory {
    pub fn new<S: Into<String>>(module: S, name: S) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_run(mut self, run: TestRun) -> Self {
        self.runs.push(run);
        self
    }

    pub fn with_series(mut self, mut series: Series) -> Self {
        let key = series.name.clone();
        series.measurements.sort_by_key(|m| m.created);
        self.series.insert(key, series);
        self
    }

    fn sort(&mut self) {
        self.runs.sort_by_key(|run| run.created);
        for series in self.series.values_mut() {
            series.measurements.sort_by_key(|m| m.created);
        }
    }

    fn last_success_first_failure(&self) -> (Option<TestRun>, Option<TestRun>) {
        let streak = self
            .runs
            .iter()
            .rev()
            .take_while(|run| !run.is_ok())
            .count();
        if streak == 0 {
            return (None, None);
        }

        let first_failure = self.runs.len() - streak;
        let last_success = first_failure
            .checked_sub(1)
            .map(|index| self.runs[index].clone());
        (last_success, Some(self.runs[first_failure].clone()))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    tests: Vec<TestHistory>,
}

/// Read only database backed by a JSON snapshot
#[derive(Debug, Clone, Default)]
pub struct JsonDatabase {
    tests: HashMap<(String, String), TestHistory>,
}

impl JsonDatabase {
    /// Empty database, every query answers with `None`
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReportError::database(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a snapshot document
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        let mut db = Self::new();
        for history in snapshot.tests {
            db.insert(history);
        }
        tracing::debug!(tests = db.tests.len(), "loaded results database");
        Ok(db)
    }

    /// Add or replace the history of a test
    pub fn insert(&mut self, mut history: TestHistory) {
        history.sort();
        let key = (history.module.clone(), history.name.clone());
        self.tests.insert(key, history);
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    fn history(&self, module: &str, name: &str) -> Option<&TestHistory> {
        self.tests.get(&(module.to_string(), name.to_string()))
    }
}

impl ResultsDatabase for JsonDatabase {
    fn last_test_run(&self, module: &str, name: &str) -> Result<Option<TestRun>> {
        Ok(self
            .history(module, name)
            .and_then(|history| history.runs.last().cloned()))
    }

    fn last_success_first_failure(
        &self,
        module: &str,
        name: &str,
    ) -> Result<(Option<TestRun>, Option<TestRun>)> {
        Ok(self
            .history(module, name)
            .map(TestHistory::last_success_first_failure)
            .unwrap_or((None, None)))
    }

    fn series(&self, module: &str, name: &str, series: &str) -> Result<Option<Series>> {
        Ok(self
            .history(module, name)
            .and_then(|history| history.series.get(series).cloned()))
    }
}
