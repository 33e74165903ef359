//! Collapsible list item for one test of the run

use super::components::{Body, HtmlComponents};
use super::doc::HtmlDoc;
use crate::config::ReportConfig;
use crate::database::ResultsDatabase;
use crate::error::Result;
use crate::formatter::format_value;
use crate::types::{ImageTest, Status, TestReport, TestRun};
use crate::utils::{abbreviate, format_key, html_escape, mean_std, relative_path};
use chrono::{DateTime, Duration, Local, Utc};
use std::path::Path;

/// Length of the commit message shown in a history row
const HISTORY_MESSAGE_LENGTH: usize = 50;

/// Sub directories of a test's output directory holding the compared images
const IMAGE_DIRS: [&str; 4] = ["imgtest", "imgref", "imgdiff", "imgmask"];

/// Renders the list item of a single test
pub struct TestRunRenderer<'a> {
    report: &'a TestReport,
    db: &'a dyn ResultsDatabase,
    base_dir: &'a Path,
    created: DateTime<Local>,
    config: &'a ReportConfig,
}

impl<'a> TestRunRenderer<'a> {
    /// `base_dir` is the directory of the page, image links are made
    /// relative to it. `created` is the time the dashboard is rendered.
    pub fn new(
        report: &'a TestReport,
        db: &'a dyn ResultsDatabase,
        base_dir: &'a Path,
        created: DateTime<Local>,
        config: &'a ReportConfig,
    ) -> Self {
        Self {
            report,
            db,
            base_dir,
            created,
            config,
        }
    }

    pub fn status(&self) -> Status {
        self.report.status()
    }

    /// Render the list item
    pub fn render(&self) -> Result<String> {
        let module = &self.report.module;
        let name = &self.report.name;
        tracing::debug!(module = %module, name = %name, "rendering test");

        let current = self.db.last_test_run(module, name)?;
        let (last_success, first_failure) = self.db.last_success_first_failure(module, name)?;

        let mut doc = HtmlDoc::new();
        doc.try_tag("ul", &[], |doc| {
            doc.asis(&self.images_item()?);

            doc.asis(&self.test_run_info("Current Version", current.as_ref()));
            if self.status() != Status::Ok {
                doc.asis(&self.test_run_info("Last Success", last_success.as_ref()));
                doc.asis(&self.test_run_info("First Failure", first_failure.as_ref()));
                if let (Some(success), Some(failure)) = (&last_success, &first_failure) {
                    doc.asis(&HtmlComponents::static_item(&HtmlComponents::key_val(
                        "Diff",
                        &HtmlComponents::diff_link(&success.commit, &failure.commit),
                    )));
                }
            }

            doc.asis(&HtmlComponents::format_log(&self.report.log_path())?);
            doc.asis(&self.screenshot());

            for key in TestReport::SIMPLE_FIELDS {
                doc.asis(&self.simple(key));
            }
            Ok(())
        })?;

        Ok(HtmlComponents::list_item(
            &self.head()?,
            Body::Markup(doc.into_string()),
            self.status(),
            true,
            true,
        ))
    }

    fn head(&self) -> Result<String> {
        let failures = self.failure_series()?;
        let runtime = self.time_series()?;
        let date = self.report.date.format(&self.config.date_format).to_string();

        let mut doc = HtmlDoc::new();
        doc.tag("div", &[("class", "row")], |doc| {
            doc.text_tag("div", &[("class", "cell testmodule")], &self.report.module);
            doc.text_tag("div", &[("class", "cell testname")], &self.report.name);
            doc.tag("div", &[("class", "cell testfailures")], |doc| doc.asis(&failures));
            doc.tag("div", &[("class", "cell testruntime")], |doc| doc.asis(&runtime));
            doc.text_tag("div", &[("class", "cell testdate")], &date);
        });
        Ok(doc.into_string())
    }

    fn failure_series(&self) -> Result<String> {
        let sparkline = self.sparkline("number_of_test_failures", "sparkline_failures", false)?;
        let mut doc = HtmlDoc::new();
        doc.tag("div", &[], |doc| {
            doc.text(&format!("{} ", self.report.failures.len()));
            doc.asis(&sparkline);
        });
        Ok(doc.into_string())
    }

    fn time_series(&self) -> Result<String> {
        let sparkline = self.sparkline("elapsed_time", "sparkline_elapsed_time", true)?;
        let mut doc = HtmlDoc::new();
        doc.tag("div", &[], |doc| {
            doc.text_tag(
                "span",
                &[("class", "runtime")],
                &format!("{:.2}s", self.report.elapsed_time),
            );
            doc.asis(&sparkline);
        });
        Ok(doc.into_string())
    }

    /// Window of the sparkline x axis as unix timestamps: from
    /// `history_days` before the render time, but not before the series
    /// existed, up to the render time. A window reaching past the
    /// representable dates starts at the earliest one.
    pub fn window(&self, series_created: Option<DateTime<Local>>) -> (i64, i64) {
        let xmax = self.created.timestamp();
        let mut xmin = Duration::try_days(self.config.history_days.max(0))
            .and_then(|span| self.created.checked_sub_signed(span))
            .map(|start| start.timestamp())
            .unwrap_or(DateTime::<Utc>::MIN_UTC.timestamp());
        if let Some(created) = series_created {
            xmin = xmin.max(created.timestamp());
        }
        (xmin, xmax)
    }

    /// Data of a trend chart drawn by the page scripts. The windowed points
    /// are embedded as a comment, the chart range and the normal range
    /// (mean ± one standard deviation of the whole series) as attributes.
    pub fn sparkline(&self, series: &str, class: &str, normal_range: bool) -> Result<String> {
        let data = self
            .db
            .series(&self.report.module, &self.report.name, series)?;
        let (xmin, xmax) = self.window(data.as_ref().map(|s| s.created));

        let (points, (mean, std)) = match &data {
            Some(data) => {
                let points = data
                    .measurements
                    .iter()
                    .filter(|m| m.created.timestamp() > xmin)
                    .map(|m| format!("{}:{}", m.created.timestamp(), m.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                (points, mean_std(&data.values()))
            }
            None => (String::new(), (0.0, 0.0)),
        };

        let xmin = xmin.to_string();
        let xmax = xmax.to_string();
        let low = (mean - std).to_string();
        let high = (mean + std).to_string();

        let mut attrs = vec![
            ("class", class),
            ("sparkChartRangeMinX", xmin.as_str()),
            ("sparkChartRangeMaxX", xmax.as_str()),
        ];
        if normal_range {
            attrs.push(("sparkNormalRangeMin", low.as_str()));
            attrs.push(("sparkNormalRangeMax", high.as_str()));
        }

        let mut doc = HtmlDoc::new();
        doc.tag("span", &attrs, |doc| doc.asis(&format!("<!-- {} -->", points)));
        Ok(doc.into_string())
    }

    fn images_item(&self) -> Result<String> {
        let (ok, fail) = self.report.image_counts();
        let short = format!("{} ok images, {} failed image tests", ok, fail);
        Ok(HtmlComponents::list_item(
            &HtmlComponents::key_val("Images", &short),
            Body::Markup(self.images()?),
            Status::from_passed(fail == 0),
            true,
            true,
        ))
    }

    fn images(&self) -> Result<String> {
        let mut doc = HtmlDoc::new();
        doc.try_tag("ol", &[], |doc| {
            for img in &self.report.image_tests {
                let [test, reference, diff, mask] =
                    IMAGE_DIRS.map(|dir| self.image_path(dir, &img.image));
                doc.asis(&HtmlComponents::list_item(
                    &self.image_short(img)?,
                    Body::Markup(HtmlComponents::test_images(&test, &reference, &diff, &mask)),
                    img.status(),
                    true,
                    false,
                ));
            }
            Ok(())
        })?;
        Ok(doc.into_string())
    }

    fn image_path(&self, kind: &str, image: &str) -> String {
        relative_path(self.report.outputdir.join(kind).join(image), self.base_dir)
    }

    fn image_short(&self, img: &ImageTest) -> Result<String> {
        let sparkline = self.sparkline(
            &format!("image_test_diff.{}", img.image),
            "sparkline_img_diff",
            true,
        )?;

        let mut doc = HtmlDoc::new();
        doc.text_tag("div", &[("class", "cell imagename")], &img.image);
        doc.text_tag(
            "div",
            &[("class", "cell imageinfo")],
            &format!("Diff: {:.8}%", img.difference),
        );
        doc.tag("div", &[("class", "cell imageinfo")], |doc| doc.asis(&sparkline));
        Ok(doc.into_string())
    }

    fn test_run_info(&self, key: &str, run: Option<&TestRun>) -> String {
        match run {
            Some(run) => {
                let commit = &run.commit;
                let summary = format!(
                    "{} {}",
                    commit.date.format(&self.config.date_format),
                    abbreviate(&commit.message, HISTORY_MESSAGE_LENGTH)
                );
                HtmlComponents::list_item(
                    &HtmlComponents::key_val(key, &html_escape(&summary)),
                    Body::Markup(HtmlComponents::commit_info(
                        commit,
                        self.config.abbreviation_length,
                        &self.config.date_format,
                    )),
                    Status::Neutral,
                    true,
                    true,
                )
            }
            None => HtmlComponents::static_item(&HtmlComponents::key_val(key, "None")),
        }
    }

    fn screenshot(&self) -> String {
        let src = relative_path(self.report.screenshot_path(), self.base_dir);
        HtmlComponents::list_item(
            &HtmlComponents::key_val("Screenshot", "..."),
            Body::Markup(HtmlComponents::image(
                &src,
                &[("alt", "Screenshot"), ("width", "100%")],
            )),
            Status::Neutral,
            true,
            true,
        )
    }

    /// Key/value row of a plain field, expandable when the value had to be
    /// abbreviated
    fn simple(&self, key: &str) -> String {
        let value = self
            .report
            .field(key)
            .map(|v| format_value(&v))
            .unwrap_or_else(|| "None".to_string());
        let short = abbreviate(&value, self.config.abbreviation_length);
        let toggle = short != value;

        HtmlComponents::list_item(
            &HtmlComponents::key_val(&format_key(key), &html_escape(&short)),
            Body::render(move |doc| doc.text_tag("pre", &[("class", "value")], &value)),
            self.report.field_status(key),
            toggle,
            true,
        )
    }
}
