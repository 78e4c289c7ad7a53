// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time slot activation per shift for the chosen area.

use crate::config::BookingConfig;
use crate::error::DomainError;
use crate::time_format::format_decimal_time;
use crate::types::{Area, AreaChoice, Availability, DecimalTime, Shift, ShiftUid, UsagePolicy};
use serde::{Deserialize, Serialize};

/// The activation of a single time button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// Bookable.
    Available,
    /// Offered by the shift but not by the chosen area; shown disabled.
    Inactive,
    /// A negative sentinel; only shown when unavailable slots are displayed.
    Unavailable,
}

/// A rendered time button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// The decimal time; negative for sentinels.
    pub time: DecimalTime,
    /// The activation state.
    pub state: SlotState,
    /// The button label.
    pub label: String,
}

/// All time buttons of one shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSlots {
    pub shift_uid: ShiftUid,
    pub shift_name: String,
    pub usage: Option<UsagePolicy>,
    pub message: Option<String>,
    pub slots: Vec<TimeSlot>,
    /// Set when the chosen area shares no time with this shift.
    pub closed_in_area: bool,
}

/// Why a board has nothing bookable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardNotice {
    /// No shift offers any time.
    NoTimesAvailable,
    /// The chosen area offers none of the shifts' times.
    AreaHasNoTimes {
        /// The chosen area's display name.
        area_name: String,
    },
}

/// Every shift's time buttons for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotBoard {
    pub shifts: Vec<ShiftSlots>,
    pub notice: Option<BoardNotice>,
}

impl SlotBoard {
    /// Finds the first available button with exactly `time`.
    #[must_use]
    pub fn find_available(&self, time: DecimalTime) -> Option<&ShiftSlots> {
        self.shifts.iter().find(|shift| {
            shift
                .slots
                .iter()
                .any(|slot| slot.state == SlotState::Available && slot.time == time)
        })
    }

    /// Returns whether `time` is an available button of `shift`.
    #[must_use]
    pub fn is_selectable(&self, shift: &ShiftUid, time: DecimalTime) -> bool {
        self.shifts
            .iter()
            .filter(|s| &s.shift_uid == shift)
            .flat_map(|s| s.slots.iter())
            .any(|slot| slot.state == SlotState::Available && slot.time == time)
    }

    /// Returns whether at least one button is available.
    #[must_use]
    pub fn has_available(&self) -> bool {
        self.shifts
            .iter()
            .flat_map(|s| s.slots.iter())
            .any(|slot| slot.state == SlotState::Available)
    }
}

/// Whether slot activation is filtered by an area's own time list.
#[derive(Debug, Clone, Copy)]
pub enum AreaFilter<'a> {
    /// Every non-negative shift time is available.
    Unfiltered,
    /// A time is available only if the area also offers it.
    Area(&'a Area),
}

/// Computes the activation of one time value.
#[must_use]
pub fn slot_state(time: DecimalTime, filter: AreaFilter<'_>) -> SlotState {
    if !time.is_offered() {
        return SlotState::Unavailable;
    }
    match filter {
        AreaFilter::Unfiltered => SlotState::Available,
        AreaFilter::Area(area) if area.offers(time) => SlotState::Available,
        AreaFilter::Area(_) => SlotState::Inactive,
    }
}

/// Computes the buttons for one shift.
///
/// Under an area filter, a shift sharing no time with the area renders no
/// buttons at all and is marked `closed_in_area`.
#[must_use]
pub fn resolve_shift_slots(
    shift: &Shift,
    filter: AreaFilter<'_>,
    config: &BookingConfig,
) -> ShiftSlots {
    let closed_in_area: bool = match filter {
        AreaFilter::Unfiltered => false,
        AreaFilter::Area(area) => !shift.times.iter().any(|t| area.offers(*t)),
    };

    let slots: Vec<TimeSlot> = if closed_in_area {
        Vec::new()
    } else {
        shift
            .times
            .iter()
            .map(|time| (*time, slot_state(*time, filter)))
            .filter(|(_, state)| *state != SlotState::Unavailable || config.show_unavailable_slots)
            .map(|(time, state)| TimeSlot {
                time,
                state,
                label: if state == SlotState::Unavailable {
                    config.strings.not_available_text.clone()
                } else {
                    format_decimal_time(time)
                },
            })
            .collect()
    };

    ShiftSlots {
        shift_uid: shift.uid.clone(),
        shift_name: shift.name.clone(),
        usage: shift.usage,
        message: shift.message.clone(),
        slots,
        closed_in_area,
    }
}

/// Computes the full slot board for the chosen area.
///
/// Area filtering applies only when area selection is enabled and a specific
/// area is chosen. On the first render cycle after a fetch, filtering is also
/// skipped when the "any" option is disabled, so the initial board shows
/// every offered time until the guest picks an area.
///
/// # Errors
///
/// Returns [`DomainError::UnknownArea`] if the chosen area is not part of the
/// availability.
pub fn resolve_slot_board(
    availability: &Availability,
    choice: Option<&AreaChoice>,
    initial_render_cycle: bool,
    config: &BookingConfig,
) -> Result<SlotBoard, DomainError> {
    let bypass_filter: bool = initial_render_cycle && !config.area_any;
    let filter: AreaFilter<'_> = match choice {
        Some(AreaChoice::Specific(uid)) if config.area_selection && !bypass_filter => {
            let area: &Area = availability
                .area(uid)
                .ok_or_else(|| DomainError::UnknownArea(uid.clone()))?;
            AreaFilter::Area(area)
        }
        _ => AreaFilter::Unfiltered,
    };

    let mut board: SlotBoard = SlotBoard {
        shifts: availability
            .shifts
            .iter()
            .map(|shift| resolve_shift_slots(shift, filter, config))
            .collect(),
        notice: None,
    };

    if !board.has_available() {
        board.notice = Some(match filter {
            AreaFilter::Unfiltered => BoardNotice::NoTimesAvailable,
            AreaFilter::Area(area) => BoardNotice::AreaHasNoTimes {
                area_name: area.name.clone(),
            },
        });
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::AreaUid;

    fn times(values: &[f64]) -> Vec<DecimalTime> {
        values.iter().copied().map(DecimalTime::new).collect()
    }

    fn create_test_shift(uid: &str, values: &[f64]) -> Shift {
        Shift {
            uid: ShiftUid::new(uid),
            name: uid.to_uppercase(),
            times: times(values),
            usage: Some(UsagePolicy::NoInteraction),
            addons: Vec::new(),
            message: None,
        }
    }

    fn create_test_availability() -> Availability {
        Availability {
            shifts: vec![
                create_test_shift("lunch", &[12.0, 12.5]),
                create_test_shift("dinner", &[18.0, 18.5, -19.0]),
            ],
            areas: vec![Area {
                uid: AreaUid::new("patio"),
                name: String::from("Patio"),
                times: times(&[18.0]),
            }],
            message: None,
        }
    }

    fn area_config() -> BookingConfig {
        BookingConfig {
            area_selection: true,
            area_any: true,
            ..BookingConfig::default()
        }
    }

    fn states(board: &SlotBoard, shift: usize) -> Vec<SlotState> {
        board.shifts[shift].slots.iter().map(|s| s.state).collect()
    }

    #[test]
    fn test_specific_area_marks_missing_times_inactive() {
        let availability: Availability = create_test_availability();
        let choice: AreaChoice = AreaChoice::from("patio");
        let board: SlotBoard =
            resolve_slot_board(&availability, Some(&choice), false, &area_config()).unwrap();
        assert_eq!(
            states(&board, 1),
            vec![
                SlotState::Available,
                SlotState::Inactive,
                SlotState::Unavailable
            ]
        );
        assert_eq!(board.shifts[1].slots[2].label, "Not Available");
        assert_eq!(board.shifts[1].slots[0].label, "6:00 PM");
    }

    #[test]
    fn test_shift_without_overlap_renders_no_buttons() {
        let availability: Availability = create_test_availability();
        let choice: AreaChoice = AreaChoice::from("patio");
        let board: SlotBoard =
            resolve_slot_board(&availability, Some(&choice), false, &area_config()).unwrap();
        assert!(board.shifts[0].closed_in_area);
        assert!(board.shifts[0].slots.is_empty());
        assert_eq!(board.notice, None);
    }

    #[test]
    fn test_any_area_skips_filtering() {
        let availability: Availability = create_test_availability();
        let board: SlotBoard =
            resolve_slot_board(&availability, Some(&AreaChoice::Any), false, &area_config())
                .unwrap();
        assert_eq!(
            states(&board, 0),
            vec![SlotState::Available, SlotState::Available]
        );
        assert_eq!(states(&board, 1)[1], SlotState::Available);
    }

    #[test]
    fn test_hidden_unavailable_slots() {
        let availability: Availability = create_test_availability();
        let config: BookingConfig = BookingConfig {
            show_unavailable_slots: false,
            ..BookingConfig::default()
        };
        let board: SlotBoard = resolve_slot_board(&availability, None, false, &config).unwrap();
        assert_eq!(board.shifts[1].slots.len(), 2);
    }

    #[test]
    fn test_initial_cycle_without_any_option_is_unfiltered() {
        let availability: Availability = create_test_availability();
        let config: BookingConfig = BookingConfig {
            area_any: false,
            ..area_config()
        };
        let choice: AreaChoice = AreaChoice::from("patio");
        let board: SlotBoard =
            resolve_slot_board(&availability, Some(&choice), true, &config).unwrap();
        assert!(!board.shifts[0].closed_in_area);
        assert_eq!(states(&board, 1)[1], SlotState::Available);

        let board: SlotBoard =
            resolve_slot_board(&availability, Some(&choice), false, &config).unwrap();
        assert_eq!(states(&board, 1)[1], SlotState::Inactive);
    }

    #[test]
    fn test_area_with_no_times_sets_notice() {
        let mut availability: Availability = create_test_availability();
        availability.areas[0].times = times(&[9.0]);
        let choice: AreaChoice = AreaChoice::from("patio");
        let board: SlotBoard =
            resolve_slot_board(&availability, Some(&choice), false, &area_config()).unwrap();
        assert_eq!(
            board.notice,
            Some(BoardNotice::AreaHasNoTimes {
                area_name: String::from("Patio")
            })
        );
    }

    #[test]
    fn test_unknown_area_is_error() {
        let availability: Availability = create_test_availability();
        let choice: AreaChoice = AreaChoice::from("cellar");
        let result: Result<SlotBoard, DomainError> =
            resolve_slot_board(&availability, Some(&choice), false, &area_config());
        assert!(matches!(result, Err(DomainError::UnknownArea(_))));
    }

    #[test]
    fn test_find_available_and_is_selectable() {
        let availability: Availability = create_test_availability();
        let choice: AreaChoice = AreaChoice::from("patio");
        let board: SlotBoard =
            resolve_slot_board(&availability, Some(&choice), false, &area_config()).unwrap();
        let found: Option<&ShiftSlots> = board.find_available(DecimalTime::new(18.0));
        assert_eq!(found.map(|s| s.shift_uid.as_str()), Some("dinner"));
        assert!(board.find_available(DecimalTime::new(18.5)).is_none());
        assert!(board.is_selectable(&ShiftUid::new("dinner"), DecimalTime::new(18.0)));
        assert!(!board.is_selectable(&ShiftUid::new("lunch"), DecimalTime::new(18.0)));
    }
}
