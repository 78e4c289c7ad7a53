// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::DecimalTime;
use time::Date;

/// Formats a decimal time as a 12-hour label.
///
/// `18.5` becomes `"6:30 PM"`. Minutes are rounded to the nearest whole
/// minute and a rounding that reaches 60 carries into the hour. Hours at or
/// past 24 wrap into the next morning. Negative sentinels are formatted by
/// their magnitude.
///
/// # Arguments
///
/// * `time` - The decimal time to format
///
/// # Returns
///
/// The label, or `"N/A"` for a non-finite value.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_decimal_time(time: DecimalTime) -> String {
    let value: f64 = time.hours().abs();
    if !value.is_finite() {
        return String::from("N/A");
    }

    let mut hours: i64 = value.floor() as i64;
    let mut minutes: i64 = ((value - value.floor()) * 60.0).round() as i64;
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }

    let hours: i64 = hours.rem_euclid(24);
    let meridiem: &str = if hours >= 12 { "PM" } else { "AM" };
    let display: i64 = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{display}:{minutes:02} {meridiem}")
}

/// Formats a date as `YYYY-MM-DD` for the wire.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn label(hours: f64) -> String {
        format_decimal_time(DecimalTime::new(hours))
    }

    #[test]
    fn test_evening_half_hour() {
        assert_eq!(label(18.5), "6:30 PM");
    }

    #[test]
    fn test_noon_and_midnight() {
        assert_eq!(label(12.0), "12:00 PM");
        assert_eq!(label(0.25), "12:15 AM");
    }

    #[test]
    fn test_past_midnight_wraps() {
        assert_eq!(label(24.5), "12:30 AM");
        assert_eq!(label(25.75), "1:45 AM");
    }

    #[test]
    fn test_rounding_carries_into_hour() {
        assert_eq!(label(18.999), "7:00 PM");
        assert_eq!(label(23.9999), "12:00 AM");
    }

    #[test]
    fn test_negative_sentinel_uses_magnitude() {
        assert_eq!(label(-9.25), "9:15 AM");
    }

    #[test]
    fn test_non_finite_is_placeholder() {
        assert_eq!(label(f64::NAN), "N/A");
    }

    #[test]
    fn test_format_date_pads() {
        assert_eq!(format_date(date!(2026 - 03 - 07)), "2026-03-07");
    }
}
