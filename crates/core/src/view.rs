// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Declarative view models rebuilt from state after every transition.
//!
//! Nothing here is incrementally patched: each render derives everything
//! from [`State`] and the configuration snapshot.

use crate::state::{AvailabilityStatus, State};
use serde::{Deserialize, Serialize};
use tablehold_domain::{
    AddonControl, AddonEngine, AddonSummary, AreaChoice, AreaOption, Availability, BoardNotice,
    BookingConfig, DecimalTime, Progress, SelectedAddon, ShiftSlots, SlotBoard, UsagePolicy,
    area_options, format_date, format_decimal_time,
};
use tracing::warn;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingView {
    /// The requested date as `YYYY-MM-DD`.
    pub date: String,
    /// The party size.
    pub covers: u32,
    /// Inline message for an invalid date or party size.
    pub input_message: Option<String>,
    /// The day's message from the payload.
    pub daily_message: Option<String>,
    /// The time selector.
    pub times: TimesView,
    /// The area picker; absent when area selection is disabled or no data
    /// is loaded.
    pub areas: Option<AreaPickerView>,
    /// The addon panel; absent until a time with addon interaction is
    /// selected.
    pub addons: Option<AddonPanelView>,
    /// The booking summary panel.
    pub summary: SummaryView,
    /// The progress gate.
    pub progress: Progress,
    /// Whether the "next" button is enabled.
    pub can_proceed: bool,
}

/// The time selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimesView {
    /// Waiting for valid inputs.
    Prompt { message: String },
    /// A fetch is in flight.
    Loading { message: String },
    /// The fetch failed.
    Failed { message: String },
    /// The day has no usable shifts.
    NoAvailability { message: String },
    /// Time buttons grouped by shift.
    Slots {
        shifts: Vec<ShiftSlots>,
        notice: Option<String>,
        selected: Option<DecimalTime>,
    },
}

/// The area picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaPickerView {
    pub options: Vec<AreaOption>,
    pub selected: Option<AreaChoice>,
    /// Set when no area can be selected at all.
    pub error: Option<String>,
}

/// The addon panel for the selected shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonPanelView {
    pub title: String,
    pub shift_name: String,
    pub policy: UsagePolicy,
    /// Usage 1 with a single eligible addon renders as a checkbox.
    pub single_toggle: bool,
    pub controls: Vec<AddonControl>,
    /// Shown instead of the controls when nothing is eligible.
    pub empty_message: Option<String>,
    /// Sum of usage-2 quantities.
    pub total_quantity: u32,
}

/// The booking summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub date: String,
    pub covers: Option<u32>,
    pub area: Option<String>,
    pub time: Option<String>,
    pub shift: Option<String>,
    /// The addon display string, `"-"` when empty.
    pub addons: String,
    pub addons_total_minor: i64,
}

/// Builds the view for `state`.
#[must_use]
pub fn render(config: &BookingConfig, state: &State) -> BookingView {
    let strings = &config.strings;
    let availability: Option<&Availability> = state.availability.loaded();
    let progress: Progress = state.progress();

    BookingView {
        date: format_date(state.selection.date),
        covers: state.selection.covers,
        input_message: state.input_issue.map(|issue| issue.message(strings)),
        daily_message: availability.and_then(|a| a.message.clone()),
        times: render_times(config, state),
        areas: availability.and_then(|a| render_areas(config, state, a)),
        addons: state
            .addon_engine()
            .and_then(|engine| render_addons(config, state, &engine)),
        summary: render_summary(config, state),
        progress,
        can_proceed: progress.is_ready() && state.input_issue.is_none(),
    }
}

fn render_times(config: &BookingConfig, state: &State) -> TimesView {
    let strings = &config.strings;
    if let Some(issue) = state.input_issue {
        return TimesView::Prompt {
            message: issue.message(strings),
        };
    }
    match &state.availability {
        AvailabilityStatus::Idle => TimesView::Prompt {
            message: strings.prompt_selection.clone(),
        },
        AvailabilityStatus::Loading { .. } => TimesView::Loading {
            message: strings.loading_times.clone(),
        },
        AvailabilityStatus::Failed { .. } => TimesView::Failed {
            message: strings.error_loading_times.clone(),
        },
        AvailabilityStatus::NoAvailability => TimesView::NoAvailability {
            message: strings.no_times_available.clone(),
        },
        AvailabilityStatus::Loaded { availability } => {
            match state.slot_board(availability, config) {
                Ok(Some(board)) => slots_view(config, state, board),
                Ok(None) => TimesView::Slots {
                    shifts: Vec::new(),
                    notice: Some(strings.no_area_available_for_selection.clone()),
                    selected: None,
                },
                Err(e) => {
                    warn!(error = %e, "Could not resolve time slots");
                    TimesView::Failed {
                        message: strings.error_generic.clone(),
                    }
                }
            }
        }
    }
}

fn slots_view(config: &BookingConfig, state: &State, board: SlotBoard) -> TimesView {
    let notice: Option<String> = board.notice.map(|notice| match notice {
        BoardNotice::NoTimesAvailable => config.strings.no_times_available.clone(),
        BoardNotice::AreaHasNoTimes { .. } => config.strings.no_times_for_area.clone(),
    });
    TimesView::Slots {
        shifts: board.shifts,
        notice,
        selected: state.selection.selected_time,
    }
}

fn render_areas(
    config: &BookingConfig,
    state: &State,
    availability: &Availability,
) -> Option<AreaPickerView> {
    if !config.area_selection {
        return None;
    }
    let options: Vec<AreaOption> = area_options(availability, config);
    let error: Option<String> = if options.is_empty() {
        Some(config.strings.no_areas_available.clone())
    } else if state.selection.area.is_none() {
        Some(config.strings.no_area_available_for_selection.clone())
    } else {
        None
    };
    Some(AreaPickerView {
        options,
        selected: state.selection.area.clone(),
        error,
    })
}

fn render_addons(
    config: &BookingConfig,
    state: &State,
    engine: &AddonEngine<'_>,
) -> Option<AddonPanelView> {
    let policy: UsagePolicy = match engine.policy() {
        None | Some(UsagePolicy::NoInteraction) => return None,
        Some(policy) => policy,
    };
    let shift = state.active_shift()?;
    let strings = &config.strings;

    let empty_message: Option<String> = if shift.addons.is_empty() {
        Some(strings.no_addons_available_time.clone())
    } else if engine.eligible().is_empty() {
        Some(strings.no_addons_for_guest_count.clone())
    } else {
        None
    };

    Some(AddonPanelView {
        title: strings.available_addons_title.clone(),
        shift_name: shift.name.clone(),
        policy,
        single_toggle: engine.is_single_toggle(),
        controls: engine.controls(&state.selection.addons),
        empty_message,
        total_quantity: state.selection.addons.quantity_total(),
    })
}

fn render_summary(config: &BookingConfig, state: &State) -> SummaryView {
    let selection = &state.selection;
    let area: Option<String> = match (&selection.area, state.availability.loaded()) {
        (Some(AreaChoice::Any), _) => Some(config.strings.any_area_selected_text.clone()),
        (Some(AreaChoice::Specific(uid)), Some(availability)) => availability
            .area(uid)
            .map(|area| area.name.clone()),
        _ => None,
    };
    let selected: Vec<SelectedAddon<'_>> = state
        .addon_engine()
        .map(|engine| engine.selected(&selection.addons))
        .unwrap_or_default();
    let summary: AddonSummary = AddonSummary::from_selected(&selected, selection.covers);

    SummaryView {
        date: format_date(selection.date),
        covers: (selection.covers > 0).then_some(selection.covers),
        area,
        time: selection.selected_time.map(format_decimal_time),
        shift: state.active_shift().map(|shift| shift.name.clone()),
        addons: summary.display(&config.currency_symbol),
        addons_total_minor: summary.total_minor,
    }
}
