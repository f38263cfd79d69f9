//! Shared helpers: dates, HTML escaping, MIME types.

pub mod date;
pub mod html;
pub mod mime;

/// Pluralize a count for log messages: `plural_count(1, "post")` -> `1 post`.
pub fn plural_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
