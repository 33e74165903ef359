//! Shared utility modules

pub mod paths;
pub mod stats;
pub mod text;

pub use paths::relative_path;
pub use stats::mean_std;
pub use text::{abbreviate, format_key, html_escape};
