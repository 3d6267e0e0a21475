//! Text-to-value normalization helpers.

use super::tags::NUMERIC_SENTINELS;

/// Parse an amount, tolerating thousands separators.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Normalize compact numeric dates.
///
/// Eight digits become `YYYY-MM-DD`, six become `YYYY-MM`; anything
/// else is returned trimmed but untouched, since some feeds already
/// carry delimited dates.
pub fn normalize_date(value: &str) -> String {
    let value = value.trim();
    if value.chars().all(|c| c.is_ascii_digit()) {
        if value.len() == 8 {
            return format!("{}-{}-{}", &value[..4], &value[4..6], &value[6..]);
        }
        if value.len() == 6 {
            return format!("{}-{}", &value[..4], &value[4..6]);
        }
    }
    value.to_string()
}

/// Sum the numeric segments of a pipe-joined capture, skipping sentinels.
pub fn sum_segments(value: &str) -> f64 {
    let mut total = 0.0;
    for part in value.split('|') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let normalized = part.replace(',', "");
        if NUMERIC_SENTINELS.contains(&normalized.as_str()) {
            continue;
        }
        if let Ok(amount) = normalized.parse::<f64>() {
            total += amount;
        }
    }
    total
}

/// Trim a name, drop wrapping quotes, and flatten embedded join delimiters.
pub fn clean_name(value: &str) -> String {
    let trimmed = value.trim().trim_matches('"').trim_matches('\'');
    trimmed.replace(" | ", " ").trim().to_string()
}
