//! Minimal markup writer
//!
//! Elements are opened and closed around a closure so the output is always
//! balanced. Text is escaped, `asis` inserts markup unchanged.

use crate::error::Result;
use crate::utils::html_escape;

/// Attribute list of an element
pub type Attrs<'a> = [(&'a str, &'a str)];

/// Markup document under construction
#[derive(Debug, Default, Clone)]
pub struct HtmlDoc {
    buf: String,
}

impl HtmlDoc {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&mut self, name: &str, attrs: &Attrs<'_>) {
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(key);
            self.buf.push_str("=\"");
            self.buf.push_str(&html_escape(value));
            self.buf.push('"');
        }
        self.buf.push('>');
    }

    fn close(&mut self, name: &str) {
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
    }

    /// Write `<name attrs>`, the content produced by `body`, then `</name>`
    pub fn tag<F>(&mut self, name: &str, attrs: &Attrs<'_>, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.open(name, attrs);
        body(self);
        self.close(name);
    }

    /// Like [`HtmlDoc::tag`] for content that can fail; the element is closed
    /// either way
    pub fn try_tag<F>(&mut self, name: &str, attrs: &Attrs<'_>, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.open(name, attrs);
        let result = body(self);
        self.close(name);
        result
    }

    /// Element with only text content
    pub fn text_tag(&mut self, name: &str, attrs: &Attrs<'_>, text: &str) {
        self.tag(name, attrs, |doc| doc.text(text));
    }

    /// Self closing element such as `img` or `meta`
    pub fn stag(&mut self, name: &str, attrs: &Attrs<'_>) {
        self.open(name, attrs);
    }

    /// Escaped text
    pub fn text(&mut self, text: &str) {
        self.buf.push_str(&html_escape(text));
    }

    /// Markup inserted unchanged
    pub fn asis(&mut self, markup: &str) {
        self.buf.push_str(markup);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_tags() {
        let mut doc = HtmlDoc::new();
        doc.tag("div", &[("class", "row")], |doc| {
            doc.text_tag("div", &[("class", "cell key")], "Log");
            doc.stag("img", &[("src", "a.png")]);
        });
        assert_eq!(
            doc.into_string(),
            r#"<div class="row"><div class="cell key">Log</div><img src="a.png"></div>"#
        );
    }

    #[test]
    fn test_text_is_escaped_asis_is_not() {
        let mut doc = HtmlDoc::new();
        doc.text("a < b");
        doc.asis("<b>c</b>");
        assert_eq!(doc.as_str(), "a &lt; b<b>c</b>");
    }

    #[test]
    fn test_try_tag_closes_on_error() {
        let mut doc = HtmlDoc::new();
        let result = doc.try_tag("ul", &[], |_| {
            Err(crate::error::ReportError::database("offline"))
        });
        assert!(result.is_err());
        assert_eq!(doc.as_str(), "<ul></ul>");
    }
}
