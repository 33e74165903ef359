//! HTML dashboard renderer
//!
//! [`DashboardRenderer`] lays out the page and saves it together with its
//! scripts, stylesheet and logo. Each test is rendered by a
//! [`TestRunRenderer`] into a collapsible list item.

pub mod assets;
mod components;
mod dashboard;
mod doc;
mod indent;
mod test_run;

pub use components::{Body, HtmlComponents};
pub use dashboard::{DashboardRenderer, HISTORY_PATTERN, LATEST_REPORT};
pub use doc::{Attrs, HtmlDoc};
pub use indent::indent;
pub use test_run::TestRunRenderer;
