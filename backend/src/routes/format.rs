//! Display strings for day counts and dates.

use crate::models::{Elapsed, Timestamp};

/// `"Now"` for a wait still running, `"Never"` when it never happened,
/// otherwise `"{n}d"`.
pub fn format_days_since(wait: Elapsed) -> String {
    match wait {
        Elapsed::Days(days) if days < 0 => "Now".to_string(),
        Elapsed::Days(days) => format!("{}d", days),
        Elapsed::Never => "Never".to_string(),
    }
}

/// `"N/A"` for an undefined interval, otherwise `"{n}d"`.
pub fn format_interval(days: Option<i64>) -> String {
    match days {
        Some(days) if days < 0 => "Now".to_string(),
        Some(days) => format!("{}d", days),
        None => "N/A".to_string(),
    }
}

/// One decimal place, `"N/A"` when there is nothing to average.
pub fn format_average(days: Option<f64>) -> String {
    match days {
        Some(days) if days.is_finite() => format!("{:.1}d", days),
        _ => "N/A".to_string(),
    }
}

/// `YYYY-MM-DD` in UTC.
pub fn format_date(ts: Timestamp) -> String {
    ts.date_label()
}

/// Rarity column text, e.g. `"6 (LIMITED)"`.
pub fn rarity_label(rarity: u8, limited: bool) -> String {
    if limited {
        format!("{} (LIMITED)", rarity)
    } else {
        rarity.to_string()
    }
}
