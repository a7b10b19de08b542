//! Format - Formatting Utilities

use chrono::{DateTime, Local, Utc};

use crate::constants::BATTERY_BAR_COUNT;

/// Shorten the decimal representation of `value` to fit a display field.
///
/// Works on the text, it never rounds. A value without a decimal point, or
/// with at most `max_digits` characters besides the point, is returned as is.
/// Otherwise the text is cut after `max_digits` characters (never inside the
/// integer part) and after `max_decimals` decimals, if given.
pub fn format_float_value(value: f64, max_digits: usize, max_decimals: Option<usize>) -> String {
    let text = value.to_string();
    let Some(point_index) = text.find('.') else {
        return text;
    };
    if text.len() - 1 <= max_digits {
        return text;
    }

    let mut cut_at = (max_digits + 1).max(point_index);
    match max_decimals {
        Some(0) => cut_at = cut_at.min(point_index),
        Some(decimals) => cut_at = cut_at.min(point_index + decimals + 1),
        None => {}
    }
    text[..cut_at].trim_end_matches('.').to_string()
}

/// Lit segments of the battery indicator for a charge level in percent
pub fn battery_bars(level: f64) -> u8 {
    (0..BATTERY_BAR_COUNT)
        .filter(|i| f64::from(100 - u32::from(*i) * 10) <= level)
        .count() as u8
}

/// Format a UTC datetime for display
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = dt.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}
