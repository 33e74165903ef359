//! Text processing utilities
//!
//! Abbreviation and key formatting shared by the HTML components.

/// Default maximum length of an abbreviated value
pub const ABBREVIATION_LENGTH: usize = 85;

/// Suffix marking an abbreviated value
pub const ELLIPSIS: &str = "…";

/// First line of `text`, cut to `length` characters, with an ellipsis when
/// anything was left out
pub fn abbreviate(text: &str, length: usize) -> String {
    let first_line = text.split('\n').next().unwrap_or_default();
    let mut short: String = first_line.chars().take(length).collect();

    if text.contains('\n') || text.chars().count() > length {
        short.push_str(ELLIPSIS);
    }
    short
}

/// `missing_imgs` becomes `Missing imgs`
pub fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let capitalized = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect::<String>(),
        None => String::new(),
    };
    capitalized.replace('_', " ")
}

/// Escape text for use in element content and attribute values
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Count non overlapping occurrences of `needle`
pub fn count_occurrences(text: &str, needle: &str) -> usize {
    text.matches(needle).count()
}
