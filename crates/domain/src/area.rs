// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-area bookability and default area selection.

use crate::config::BookingConfig;
use crate::types::{Area, AreaChoice, Availability};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Returns whether any shift shares a non-negative time with the area.
#[must_use]
pub fn area_is_available(area: &Area, availability: &Availability) -> bool {
    availability
        .shifts
        .iter()
        .any(|shift| shift.times.iter().any(|t| area.offers(*t)))
}

/// Returns whether the synthetic "any" option has something to offer.
///
/// With no areas configured, "any" is available as soon as one shift offers
/// a non-negative time.
#[must_use]
pub fn any_area_is_available(availability: &Availability) -> bool {
    if availability.areas.is_empty() {
        availability.shifts.iter().any(|s| s.has_offered_time())
    } else {
        availability
            .areas
            .iter()
            .any(|area| area_is_available(area, availability))
    }
}

/// Returns whether `choice` can be selected under `config`.
///
/// An unknown area uid is never available.
#[must_use]
pub fn choice_is_available(
    choice: &AreaChoice,
    availability: &Availability,
    config: &BookingConfig,
) -> bool {
    match choice {
        AreaChoice::Any => config.any_area_enabled() && any_area_is_available(availability),
        AreaChoice::Specific(uid) => availability
            .area(uid)
            .is_some_and(|area| area_is_available(area, availability)),
    }
}

/// One entry of the area picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaOption {
    /// The value submitted when this option is chosen.
    pub choice: AreaChoice,
    /// Display name.
    pub name: String,
    /// Whether the option can be chosen.
    pub available: bool,
    /// Marker shown next to a disabled option.
    pub notice: Option<String>,
}

/// Lists the area picker entries, "any" first when enabled.
///
/// Unavailable areas are listed disabled with a notice instead of being
/// hidden. Returns an empty list when area selection is disabled.
#[must_use]
pub fn area_options(availability: &Availability, config: &BookingConfig) -> Vec<AreaOption> {
    if !config.area_selection {
        return Vec::new();
    }

    let mut options: Vec<AreaOption> = Vec::with_capacity(availability.areas.len() + 1);
    if config.area_any {
        let available: bool = any_area_is_available(availability);
        options.push(AreaOption {
            choice: AreaChoice::Any,
            name: config.strings.any_area_text.clone(),
            available,
            notice: (!available).then(|| config.strings.no_areas_available.clone()),
        });
    }

    for area in &availability.areas {
        let available: bool = area_is_available(area, availability);
        options.push(AreaOption {
            choice: AreaChoice::Specific(area.uid.clone()),
            name: area.name.clone(),
            available,
            notice: (!available).then(|| config.strings.area_unavailable_notice(&area.name)),
        });
    }
    options
}

/// Re-derives the area selection after new availability arrives.
///
/// The previous choice is kept when still available. Otherwise the order is:
/// "any" when it is the configured default, then the first available
/// specific area, then "any" when merely available. Every "any" outcome also
/// requires "any" to be enabled and available.
///
/// # Returns
///
/// * `None` if area selection is disabled, or if nothing is selectable.
#[must_use]
pub fn resolve_area(
    previous: Option<&AreaChoice>,
    availability: &Availability,
    config: &BookingConfig,
) -> Option<AreaChoice> {
    if !config.area_selection {
        return None;
    }

    if let Some(candidate) = previous
        && choice_is_available(candidate, availability, config)
    {
        return Some(candidate.clone());
    }

    let any_available: bool = choice_is_available(&AreaChoice::Any, availability, config);

    let resolved: Option<AreaChoice> = if any_available && config.area_any_default {
        Some(AreaChoice::Any)
    } else if let Some(area) = availability
        .areas
        .iter()
        .find(|area| area_is_available(area, availability))
    {
        Some(AreaChoice::Specific(area.uid.clone()))
    } else if any_available {
        Some(AreaChoice::Any)
    } else {
        None
    };

    debug!(previous = ?previous, resolved = ?resolved, "Re-derived area selection");
    resolved
}
