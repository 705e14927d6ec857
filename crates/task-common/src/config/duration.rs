//! Human-readable durations for token lifetimes
//!
//! Accepts values such as `15m`, `7d`, `1.5h`, `30 seconds` or `900`.
//! A bare number is taken as seconds. Units below one second are allowed but
//! the result is truncated to whole seconds, since JWT timestamps are seconds.

/// Parse a duration string into whole seconds
///
/// Returns `None` for empty, negative, zero-second or unrecognised input.
#[must_use]
pub fn parse_duration(input: &str) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let split = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (number, unit) = input.split_at(split);

    let value: f64 = number.parse().ok()?;
    let multiplier = unit_seconds(&unit.trim().to_ascii_lowercase())?;

    let seconds = value * multiplier;
    if !seconds.is_finite() || seconds < 1.0 || seconds > i64::MAX as f64 {
        return None;
    }

    Some(seconds.trunc() as i64)
}

fn unit_seconds(unit: &str) -> Option<f64> {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = MINUTE * 60.0;
    const DAY: f64 = HOUR * 24.0;
    const WEEK: f64 = DAY * 7.0;
    const YEAR: f64 = DAY * 365.25;

    let seconds = match unit {
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 0.001,
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1.0,
        "m" | "min" | "mins" | "minute" | "minutes" => MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => HOUR,
        "d" | "day" | "days" => DAY,
        "w" | "week" | "weeks" => WEEK,
        "y" | "yr" | "yrs" | "year" | "years" => YEAR,
        _ => return None,
    };
    Some(seconds)
}
