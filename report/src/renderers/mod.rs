//! Report renderers
//!
//! Rendering is pure markup assembly; the only I/O happens when reading test
//! logs and when the dashboard saves itself.

pub mod html;

pub use html::{DashboardRenderer, HtmlComponents, TestRunRenderer};
