//! Records consumed by the renderers
//!
//! Everything here is produced by the test driver or the results database and
//! is only read while rendering.

use crate::formatter::Value;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overall status of a test, an image or a single report field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Fail,
    /// Field is neither in the success nor in the failure list
    Neutral,
}

impl Status {
    /// Status derived from a pass/fail flag
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Status::Ok
        } else {
            Status::Fail
        }
    }

    /// CSS class used to color list item heads
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Fail => "fail",
            Status::Neutral => "",
        }
    }
}

/// Result of comparing one rendered image against its reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTest {
    /// Image file name, shared by the test, reference, diff and mask images
    pub image: String,
    /// Difference score, zero means pixel identical
    pub difference: f64,
}

impl ImageTest {
    pub fn new<S: Into<String>>(image: S, difference: f64) -> Self {
        Self {
            image: image.into(),
            difference,
        }
    }

    /// Only an exact zero difference passes
    pub fn is_ok(&self) -> bool {
        self.difference == 0.0
    }

    pub fn status(&self) -> Status {
        Status::from_passed(self.is_ok())
    }
}

/// Outcome of one test in the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    #[serde(default)]
    pub name: String,
    pub module: String,
    #[serde(with = "local_date")]
    pub date: DateTime<Local>,
    /// Wall time in seconds
    pub elapsed_time: f64,
    #[serde(default)]
    pub image_tests: Vec<ImageTest>,
    /// Keys of the fields that failed
    #[serde(default)]
    pub failures: Vec<String>,
    /// Keys of the fields that passed
    #[serde(default)]
    pub successes: Vec<String>,
    pub outputdir: PathBuf,
    /// Log file, relative to `outputdir`
    pub log: PathBuf,
    /// Screenshot file, relative to `outputdir`
    pub screenshot: PathBuf,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub command: Vec<String>,
    #[serde(default)]
    pub returncode: Option<i64>,
    #[serde(default)]
    pub missing_imgs: Vec<String>,
    #[serde(default)]
    pub missing_refs: Vec<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub errors: Option<String>,
}

impl TestReport {
    /// Fields listed as plain key/value rows, in display order
    pub const SIMPLE_FIELDS: [&'static str; 7] = [
        "path",
        "command",
        "returncode",
        "missing_imgs",
        "missing_refs",
        "output",
        "errors",
    ];

    /// A report is ok iff nothing failed, image results are not consulted
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn status(&self) -> Status {
        Status::from_passed(self.is_ok())
    }

    /// Status of a single field, a failure wins over a success
    pub fn field_status(&self, key: &str) -> Status {
        if self.failures.iter().any(|k| k == key) {
            Status::Fail
        } else if self.successes.iter().any(|k| k == key) {
            Status::Ok
        } else {
            Status::Neutral
        }
    }

    /// Number of images with zero and non-zero difference
    pub fn image_counts(&self) -> (usize, usize) {
        let ok = self.image_tests.iter().filter(|img| img.is_ok()).count();
        (ok, self.image_tests.len() - ok)
    }

    /// Value of one of the simple fields, `None` for unknown keys
    pub fn field(&self, key: &str) -> Option<Value> {
        let value = match key {
            "path" => Value::from(self.path.clone()),
            "command" => Value::from(self.command.clone()),
            "returncode" => Value::from(self.returncode),
            "missing_imgs" => Value::from(self.missing_imgs.clone()),
            "missing_refs" => Value::from(self.missing_refs.clone()),
            "output" => Value::from(self.output.clone()),
            "errors" => Value::from(self.errors.clone()),
            _ => return None,
        };
        Some(value)
    }

    pub fn log_path(&self) -> PathBuf {
        self.outputdir.join(&self.log)
    }

    pub fn screenshot_path(&self) -> PathBuf {
        self.outputdir.join(&self.screenshot)
    }
}

/// Version control metadata of a historical run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub message: String,
    #[serde(with = "local_date")]
    pub date: DateTime<Local>,
    /// Remote repository URL, empty when unknown
    #[serde(default)]
    pub server: String,
}

impl Commit {
    pub fn has_server(&self) -> bool {
        !self.server.is_empty()
    }
}

/// Snapshot of a test outcome at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    #[serde(with = "local_date")]
    pub created: DateTime<Local>,
    pub commit: Commit,
    #[serde(default)]
    pub failures: usize,
}

impl TestRun {
    pub fn is_ok(&self) -> bool {
        self.failures == 0
    }
}

/// One point of a historical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(with = "local_date")]
    pub created: DateTime<Local>,
    pub value: f64,
}

/// Named time series, ordered by `created`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub name: String,
    #[serde(with = "local_date")]
    pub created: DateTime<Local>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Series {
    pub fn values(&self) -> Vec<f64> {
        self.measurements.iter().map(|m| m.value).collect()
    }
}

/// Timestamps are written as RFC 3339. Reading also accepts naive ISO 8601
/// stamps, taken as local time.
mod local_date {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(text: &str) -> Option<DateTime<Local>> {
        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Some(date.with_timezone(&Local));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    }

    pub fn serialize<S>(date: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", text)))
    }
}
