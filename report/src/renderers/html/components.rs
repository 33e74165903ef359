//! Reusable HTML components for building the dashboard

use super::doc::HtmlDoc;
use crate::error::{ReportError, Result};
use crate::types::{Commit, Status};
use crate::utils::text::{abbreviate, count_occurrences, html_escape};
use std::path::Path;

/// Content of an expandable list item
pub enum Body<'a> {
    /// Ready made markup
    Markup(String),
    /// Callback writing the content straight into the item
    Render(Box<dyn FnOnce(&mut HtmlDoc) + 'a>),
}

impl<'a> Body<'a> {
    pub fn empty() -> Self {
        Body::Markup(String::new())
    }

    pub fn render<F: FnOnce(&mut HtmlDoc) + 'a>(f: F) -> Self {
        Body::Render(Box::new(f))
    }

    fn write(self, doc: &mut HtmlDoc) {
        match self {
            Body::Markup(markup) => doc.asis(&markup),
            Body::Render(f) => f(doc),
        }
    }
}

impl From<String> for Body<'_> {
    fn from(markup: String) -> Self {
        Body::Markup(markup)
    }
}

impl From<&str> for Body<'_> {
    fn from(markup: &str) -> Self {
        Body::Markup(markup.to_string())
    }
}

/// Captions of the image comparison table
const IMAGE_COLUMNS: [&str; 4] = ["Test", "Reference", "Difference * 10", "Mask"];

/// Reusable HTML components for report generation
pub struct HtmlComponents;

impl HtmlComponents {
    /// Key cell followed by a value cell holding `value` markup
    pub fn key_val(key: &str, value: &str) -> String {
        let mut doc = HtmlDoc::new();
        doc.tag("div", &[("class", "row")], |doc| {
            doc.text_tag("div", &[("class", "cell key")], key);
            doc.tag("div", &[("class", "cell")], |doc| doc.asis(value));
        });
        doc.into_string()
    }

    /// Class list of a list item head
    pub fn head_class(status: Status, toggle: bool) -> String {
        let mut classes = vec!["lihead"];
        if !status.css_class().is_empty() {
            classes.push(status.css_class());
        }
        if toggle {
            classes.push("toggle");
        }
        classes.join(" ")
    }

    /// List item with a head row and, when `toggle` is set, a body revealed
    /// by clicking the head. `hide` starts the body collapsed.
    pub fn list_item(
        head: &str,
        body: Body<'_>,
        status: Status,
        toggle: bool,
        hide: bool,
    ) -> String {
        let mut doc = HtmlDoc::new();
        doc.tag("li", &[("class", "row")], |doc| {
            let class = Self::head_class(status, toggle);
            doc.tag("div", &[("class", class.as_str())], |doc| doc.asis(head));
            if toggle {
                let attrs: &[(&str, &str)] = if hide {
                    &[("class", "libody"), ("style", "display: none;")]
                } else {
                    &[("class", "libody")]
                };
                doc.tag("div", attrs, |doc| body.write(doc));
            }
        });
        doc.into_string()
    }

    /// Item without a body
    pub fn static_item(head: &str) -> String {
        Self::list_item(head, Body::empty(), Status::Neutral, false, true)
    }

    /// Link to the commit on its server, or the bare hash
    pub fn git_link(commit: &Commit) -> String {
        let mut doc = HtmlDoc::new();
        if commit.has_server() {
            let url = format!("{}/commit/{}", commit.server, commit.hash);
            doc.text_tag("a", &[("href", url.as_str())], &url);
        } else {
            doc.text(&commit.hash);
        }
        doc.into_string()
    }

    /// Link comparing two commits on the server of `start`
    pub fn diff_link(start: &Commit, stop: &Commit) -> String {
        let mut doc = HtmlDoc::new();
        let range = format!("{}...{}", start.hash, stop.hash);
        if start.has_server() {
            let url = format!("{}/compare/{}", start.server, range);
            doc.text_tag("a", &[("href", url.as_str())], &url);
        } else {
            doc.text(&range);
        }
        doc.into_string()
    }

    /// Message, author, date and repository of a commit
    pub fn commit_info(commit: &Commit, abbreviation_length: usize, date_format: &str) -> String {
        let mut doc = HtmlDoc::new();
        doc.tag("ul", &[], |doc| {
            let message = &commit.message;
            let short = abbreviate(message, abbreviation_length);
            let date = commit.date.format(date_format).to_string();

            doc.asis(&Self::list_item(
                &Self::key_val("Message", &html_escape(&short)),
                Body::render(|doc| doc.text_tag("pre", &[("class", "value")], message)),
                Status::Neutral,
                short != *message,
                true,
            ));
            doc.asis(&Self::static_item(&Self::key_val(
                "Author",
                &html_escape(&commit.author),
            )));
            doc.asis(&Self::static_item(&Self::key_val("Date", &date)));
            doc.asis(&Self::static_item(&Self::key_val(
                "Repository",
                &Self::git_link(commit),
            )));
        });
        doc.into_string()
    }

    /// `Error: E, Warnings: W, Information: I` for a log text
    pub fn log_summary(log: &str) -> (String, Status) {
        let errors = count_occurrences(log, "Error:");
        let warnings = count_occurrences(log, "Warn:");
        let infos = count_occurrences(log, "Info:");
        let short = format!(
            "Error: {}, Warnings: {}, Information: {}",
            errors, warnings, infos
        );
        (short, Status::from_passed(errors == 0))
    }

    /// Log item with a summary head; the log itself is embedded verbatim
    pub fn format_log(path: &Path) -> Result<String> {
        let log = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ReportError::LogNotFound {
                path: path.to_path_buf(),
            },
            _ => ReportError::Io(e),
        })?;

        let (short, status) = Self::log_summary(&log);
        let body = Body::render(|doc| {
            doc.tag("div", &[("class", "log")], |doc| doc.asis(&log));
        });
        Ok(Self::list_item(
            &Self::key_val("Log", &short),
            body,
            status,
            true,
            true,
        ))
    }

    pub fn image(src: &str, attrs: &[(&str, &str)]) -> String {
        let mut doc = HtmlDoc::new();
        let mut all = vec![("src", src)];
        all.extend_from_slice(attrs);
        doc.stag("img", &all);
        doc.into_string()
    }

    /// Test, reference, difference and mask images side by side
    pub fn test_images(test: &str, reference: &str, diff: &str, mask: &str) -> String {
        let mut doc = HtmlDoc::new();
        doc.tag("table", &[("class", "zoomset")], |doc| {
            doc.tag("tr", &[], |doc| {
                for caption in IMAGE_COLUMNS {
                    doc.text_tag("th", &[], caption);
                }
            });
            doc.tag("tr", &[], |doc| {
                let cells = [
                    (test, "test image", "test"),
                    (reference, "reference image", "test"),
                    (diff, "difference image", "diff"),
                    (mask, "mask image", "diff"),
                ];
                for (src, alt, class) in cells {
                    doc.tag("td", &[("class", "zoom")], |doc| {
                        doc.asis(&Self::image(src, &[("alt", alt), ("class", class)]));
                    });
                }
            });
        });
        doc.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::io::Write;

    fn commit(server: &str) -> Commit {
        Commit {
            hash: "abc123".to_string(),
            author: "Jane Doe".to_string(),
            message: "Fix volume raycaster".to_string(),
            date: Local.with_ymd_and_hms(2023, 1, 10, 14, 5, 0).unwrap(),
            server: server.to_string(),
        }
    }

    #[test]
    fn test_key_val() {
        assert_eq!(
            HtmlComponents::key_val("Images", "1 ok"),
            r#"<div class="row"><div class="cell key">Images</div><div class="cell">1 ok</div></div>"#
        );
    }

    #[test]
    fn test_list_item_toggle_and_hide() {
        let item = HtmlComponents::list_item("head", "body".into(), Status::Fail, true, true);
        assert_eq!(
            item,
            r#"<li class="row"><div class="lihead fail toggle">head</div><div class="libody" style="display: none;">body</div></li>"#
        );

        let shown = HtmlComponents::list_item("head", "body".into(), Status::Ok, true, false);
        assert!(shown.contains(r#"<div class="libody">body</div>"#));

        let plain = HtmlComponents::static_item("head");
        assert_eq!(plain, r#"<li class="row"><div class="lihead">head</div></li>"#);
    }

    #[test]
    fn test_list_item_render_callback() {
        let item = HtmlComponents::list_item(
            "head",
            Body::render(|doc| doc.text_tag("b", &[], "x")),
            Status::Neutral,
            true,
            false,
        );
        assert!(item.contains("<b>x</b>"));
    }

    #[test]
    fn test_git_links() {
        let with_server = commit("https://github.com/inviwo/inviwo");
        assert_eq!(
            HtmlComponents::git_link(&with_server),
            r#"<a href="https://github.com/inviwo/inviwo/commit/abc123">https://github.com/inviwo/inviwo/commit/abc123</a>"#
        );
        assert_eq!(HtmlComponents::git_link(&commit("")), "abc123");

        let mut stop = with_server.clone();
        stop.hash = "def456".to_string();
        assert!(HtmlComponents::diff_link(&with_server, &stop)
            .contains(r#"href="https://github.com/inviwo/inviwo/compare/abc123...def456""#));
        assert_eq!(
            HtmlComponents::diff_link(&commit(""), &commit("")),
            "abc123...abc123"
        );
    }

    #[test]
    fn test_commit_info() {
        let info = HtmlComponents::commit_info(&commit(""), 85, "%Y-%m-%d %H:%M:%S");
        assert!(info.contains("Fix volume raycaster"));
        assert!(info.contains("2023-01-10 14:05:00"));
        assert!(info.contains("Jane Doe"));
        // short message, nothing to expand
        assert!(!info.contains("toggle"));
    }

    #[test]
    fn test_commit_info_escapes_message() {
        let mut commit = commit("");
        commit.message = "Use <b> in docs\nand more".to_string();
        let info = HtmlComponents::commit_info(&commit, 85, "%Y-%m-%d");
        assert!(info.contains("Use &lt;b&gt; in docs…"));
        assert!(info.contains("lihead toggle"));
        assert!(!info.contains("<b>"));
    }

    #[test]
    fn test_log_summary() {
        let (short, status) = HtmlComponents::log_summary("Info: a\nInfo: b\nWarn: c\n");
        assert_eq!(short, "Error: 0, Warnings: 1, Information: 2");
        assert_eq!(status, Status::Ok);

        let (short, status) = HtmlComponents::log_summary("Error: a\nError:b");
        assert_eq!(short, "Error: 2, Warnings: 0, Information: 0");
        assert_eq!(status, Status::Fail);

        // only the exact literal counts
        let (_, status) = HtmlComponents::log_summary("error: lower case\nErrors: none");
        assert_eq!(status, Status::Ok);
    }

    #[test]
    fn test_format_log() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Info: <b>loaded</b>\nError: crash").unwrap();

        let item = HtmlComponents::format_log(file.path()).unwrap();
        assert!(item.contains("lihead fail toggle"));
        assert!(item.contains(r#"<div class="log">Info: <b>loaded</b>"#));
        assert!(item.contains("Error: 1, Warnings: 0, Information: 1"));
    }

    #[test]
    fn test_format_log_missing() {
        let err = HtmlComponents::format_log(Path::new("/nonexistent/log.txt")).unwrap_err();
        assert!(matches!(err, ReportError::LogNotFound { .. }));
    }

    #[test]
    fn test_images_table() {
        let table = HtmlComponents::test_images("t.png", "r.png", "d.png", "m.png");
        assert!(table.contains("<th>Difference * 10</th>"));
        assert!(table.contains(r#"<img src="d.png" alt="difference image" class="diff">"#));
        assert_eq!(table.matches("<td class=\"zoom\">").count(), 4);
    }
}
