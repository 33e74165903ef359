//! Page shell around the per-test list items

use super::assets::{self, IMAGE_DIR, LOGO, SCRIPT_DIR, STYLESHEET};
use super::doc::HtmlDoc;
use super::indent::indent;
use super::test_run::TestRunRenderer;
use crate::config::ReportConfig;
use crate::database::ResultsDatabase;
use crate::error::Result;
use crate::types::TestReport;
use crate::utils::relative_path;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Name of the page linked as the latest report
pub const LATEST_REPORT: &str = "report.html";

/// File name pattern of archived reports
pub const HISTORY_PATTERN: &str = "report-*.html";

/// Sortable columns: (sort key, caption)
const COLUMNS: [(&str, &str); 5] = [
    ("testmodule", "Module"),
    ("testname", "Name"),
    ("testfailures", "Failures"),
    ("testruntime", "Run Time"),
    ("testdate", "Last Run"),
];

/// Renders the dashboard of a complete test run
pub struct DashboardRenderer<'a> {
    base_dir: PathBuf,
    reports: &'a [TestReport],
    db: &'a dyn ResultsDatabase,
    created: DateTime<Local>,
    config: ReportConfig,
}

impl<'a> DashboardRenderer<'a> {
    /// The render time is taken now and shared by every test
    pub fn new<P: Into<PathBuf>>(
        base_dir: P,
        reports: &'a [TestReport],
        db: &'a dyn ResultsDatabase,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            reports,
            db,
            created: Local::now(),
            config: ReportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the render time
    pub fn with_created(mut self, created: DateTime<Local>) -> Self {
        self.created = created;
        self
    }

    pub fn created(&self) -> DateTime<Local> {
        self.created
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Archived reports in the output directory, newest first, as links
    /// relative to the output directory
    pub fn history_links(&self) -> Result<Vec<String>> {
        let dir = glob::Pattern::escape(&self.base_dir.to_string_lossy());
        let pattern = format!("{}/{}", dir.trim_end_matches('/'), HISTORY_PATTERN);

        let mut reports = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
        reports.sort();
        reports.reverse();

        Ok(reports
            .iter()
            .take(self.config.history_links)
            .map(|path| relative_path(path, &self.base_dir))
            .collect())
    }

    /// Complete page markup, not indented
    pub fn render(&self) -> Result<String> {
        let mut doc = HtmlDoc::new();
        doc.asis("<!DOCTYPE html>");
        doc.stag("meta", &[("charset", "utf-8")]);

        doc.try_tag("html", &[], |doc| {
            doc.tag("head", &[], |doc| {
                doc.stag("link", &[("rel", "stylesheet"), ("href", STYLESHEET)]);
                for script in assets::script_names() {
                    Self::script_tag(doc, script);
                }
            });

            doc.try_tag("body", &[], |doc| {
                doc.try_tag("div", &[("id", "reportlist")], |doc| {
                    self.title(doc);
                    self.subtitle(doc)?;
                    Self::column_heads(doc);
                    doc.try_tag("ul", &[("class", "list")], |doc| {
                        for report in self.reports {
                            let item = TestRunRenderer::new(
                                report,
                                self.db,
                                &self.base_dir,
                                self.created,
                                &self.config,
                            )
                            .render()?;
                            doc.asis(&item);
                        }
                        Ok(())
                    })
                })?;
                Self::script_tag(doc, "make-list.js");
                Ok(())
            })
        })?;

        Ok(doc.into_string())
    }

    fn script_tag(doc: &mut HtmlDoc, script: &str) {
        let src = format!("{}/{}", SCRIPT_DIR, script);
        doc.tag(
            "script",
            &[("language", "javascript"), ("src", src.as_str())],
            |_| {},
        );
    }

    fn title(&self, doc: &mut HtmlDoc) {
        let logo = format!("{}/{}", IMAGE_DIR, LOGO);
        doc.tag("div", &[], |doc| {
            doc.tag("div", &[("class", "titleimg")], |doc| {
                doc.stag("img", &[("src", logo.as_str())]);
            });
            doc.text_tag("div", &[("class", "title")], &self.config.title);
            doc.stag("input", &[("class", "search"), ("placeholder", "Search")]);
        });
    }

    fn subtitle(&self, doc: &mut HtmlDoc) -> Result<()> {
        let links = self.history_links()?;
        let created = self.created.format(&self.config.date_format).to_string();

        doc.tag("div", &[("class", "subtitle")], |doc| {
            doc.text_tag("div", &[("class", "cell testdate")], &created);
            doc.tag("div", &[("class", "cell")], |doc| {
                doc.text_tag("a", &[("class", "version"), ("href", LATEST_REPORT)], "latest");
                for (i, href) in links.iter().enumerate() {
                    doc.text_tag(
                        "a",
                        &[("class", "version"), ("href", href.as_str())],
                        &format!("-{}", i + 1),
                    );
                }
            });
        });
        Ok(())
    }

    fn column_heads(doc: &mut HtmlDoc) {
        doc.tag("div", &[("class", "head")], |doc| {
            for (key, caption) in COLUMNS {
                let class = format!("cell {}", key);
                doc.tag("div", &[("class", class.as_str())], |doc| {
                    doc.text_tag("button", &[("data-sort", key), ("class", "sort")], caption);
                });
            }
        });
    }

    /// Write `<basename>.html` and the static assets to the output
    /// directory. Returns the path of the page.
    pub fn save_html(&self, basename: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.base_dir)?;
        assets::save_assets(&self.base_dir)?;

        let page = indent(&self.render()?);
        let file = self.base_dir.join(format!("{}.html", basename));
        std::fs::write(&file, page)?;

        tracing::info!(
            path = %file.display(),
            tests = self.reports.len(),
            "saved report"
        );
        Ok(file)
    }
}
