//! Shared formatting helpers for the display sink.
//!
//! Pure functions only; no ratatui styles here.

/// Formats a per-second rate for a statistics table cell.
///
/// Whole numbers print without decimals, fractions with two.
pub fn format_rate_cell(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{:.0}", rate)
    } else {
        format!("{:.2}", rate)
    }
}

/// Truncates `s` to at most `width` characters, marking the cut with `~`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('~');
    out
}

/// Collapses newlines and runs of whitespace in query text to single spaces.
pub fn normalize_query(q: &str) -> String {
    q.split_whitespace().collect::<Vec<_>>().join(" ")
}
