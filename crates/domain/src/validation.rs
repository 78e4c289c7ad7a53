// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::{BookingConfig, LanguageStrings};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`DomainError::DateParseError`] if the input is not a valid date.
pub fn parse_date(date_string: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(date_string.trim(), &format).map_err(|e| DomainError::DateParseError {
        date_string: date_string.to_string(),
        error: e.to_string(),
    })
}

/// A recoverable problem with the guest's date or party size.
///
/// Input issues block the availability fetch and are shown inline; they
/// clear as soon as the input is corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputIssue {
    /// The chosen date is before today.
    DateInPast,
    /// No party size has been chosen.
    CoversMissing,
    /// The party size is outside the configured range.
    CoversOutOfRange {
        covers: u32,
        min: u32,
        max: u32,
    },
}

impl InputIssue {
    /// The guest-facing message for this issue.
    #[must_use]
    pub fn message(self, strings: &LanguageStrings) -> String {
        match self {
            Self::DateInPast => strings.error_date_in_past.clone(),
            Self::CoversMissing => strings.error_covers_missing.clone(),
            Self::CoversOutOfRange { .. } => strings.error_invalid_input.clone(),
        }
    }
}

/// Checks the fetch inputs.
///
/// # Returns
///
/// * `None` when a fetch may be issued
/// * `Some(issue)` describing the first problem found otherwise
#[must_use]
pub fn validate_booking_input(
    date: Date,
    today: Date,
    covers: u32,
    config: &BookingConfig,
) -> Option<InputIssue> {
    if date < today {
        return Some(InputIssue::DateInPast);
    }
    if covers == 0 {
        return Some(InputIssue::CoversMissing);
    }
    if covers < config.party_min || covers > config.party_max {
        return Some(InputIssue::CoversOutOfRange {
            covers,
            min: config.party_min,
            max: config.party_max,
        });
    }
    None
}

/// Interprets free-text party size input.
///
/// Non-numeric input and values below the minimum become the minimum;
/// values above the maximum become the maximum.
#[must_use]
pub fn parse_covers_input(text: &str, config: &BookingConfig) -> u32 {
    text.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .map_or(config.party_min, |n| {
            n.clamp(config.party_min, config.party_max)
        })
}

/// A party size stepper button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoversStep {
    Up,
    Down,
}

/// Applies a stepper click.
///
/// Stepping up from zero lands on the configured minimum. Clicks at either
/// bound change nothing.
///
/// # Returns
///
/// * `Some(covers)` with the new value
/// * `None` if the click has no effect
#[must_use]
pub fn step_covers(current: u32, step: CoversStep, config: &BookingConfig) -> Option<u32> {
    let next: u32 = match step {
        CoversStep::Up if current < config.party_min => config.party_min,
        CoversStep::Up if current < config.party_max => current + 1,
        CoversStep::Down if current > config.party_min => (current - 1).min(config.party_max),
        CoversStep::Up | CoversStep::Down => return None,
    };
    (next != current).then_some(next)
}
