//! Parsing of user-entered percentages.
//!
//! Settings surfaces hand raw text to these helpers and supply their own
//! fallback.  A parse failure is never surfaced as an error past this point.

use tracing::debug;

/// Parses a percentage typed by the user.
///
/// Surrounding whitespace and a single trailing `%` are accepted.  Returns
/// `None` for empty, unparsable or non-finite input (`"nan"`, `"inf"`).
/// Range is not checked here; out-of-range values are clamped when the
/// bounds are stored.
pub fn parse_percent(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a percentage, substituting `fallback` when the text is unusable.
pub fn parse_percent_or(text: &str, fallback: f64) -> f64 {
    match parse_percent(text) {
        Some(value) => value,
        None => {
            debug!(input = text, fallback, "unparsable percentage, using fallback");
            fallback
        }
    }
}
