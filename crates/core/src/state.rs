// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use tablehold_domain::{
    AddonEngine, AddonSelection, AddonUid, AreaChoice, Availability, BookingConfig, DecimalTime,
    DomainError, InputIssue, Progress, QuantityOutcome, Shift, ShiftUid, SlotBoard, UsagePolicy,
    evaluate_progress, resolve_slot_board,
};
use time::Date;

/// Identifies one issued availability fetch.
///
/// Tickets increase monotonically within a session; only the most recently
/// issued ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Wraps a raw ticket number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ticket number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the session's availability data stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Nothing requested, or the inputs block a fetch.
    Idle,
    /// A fetch is in flight.
    Loading {
        /// The only ticket whose result will be applied.
        ticket: FetchTicket,
        /// The time to re-select once the result arrives.
        sticky_time: Option<DecimalTime>,
    },
    /// The latest fetch produced usable availability.
    Loaded {
        /// The validated payload.
        availability: Availability,
    },
    /// The latest fetch returned no usable shifts.
    NoAvailability,
    /// The latest fetch failed; not retried.
    Failed {
        /// The transport or decoding failure.
        reason: String,
    },
}

impl AvailabilityStatus {
    /// Returns the loaded availability, if any.
    #[must_use]
    pub const fn loaded(&self) -> Option<&Availability> {
        match self {
            Self::Loaded { availability } => Some(availability),
            _ => None,
        }
    }
}

/// The guest's selection for the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// The requested date.
    pub date: Date,
    /// The party size; zero until chosen.
    pub covers: u32,
    /// The chosen area, if area selection applies.
    pub area: Option<AreaChoice>,
    /// The selected time.
    pub selected_time: Option<DecimalTime>,
    /// The shift the selected time belongs to.
    pub selected_shift: Option<ShiftUid>,
    /// The usage policy of the selected shift.
    pub policy: Option<UsagePolicy>,
    /// Addon choices for the selected shift.
    pub addons: AddonSelection,
}

impl SelectionState {
    /// Creates a fresh selection for `date` with no party size.
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self {
            date,
            covers: 0,
            area: None,
            selected_time: None,
            selected_shift: None,
            policy: None,
            addons: AddonSelection::Empty,
        }
    }

    /// Clears the time, the shift and every addon choice.
    pub fn clear_time(&mut self) {
        self.selected_time = None;
        self.selected_shift = None;
        self.policy = None;
        self.addons = AddonSelection::Empty;
    }

    /// Selects `time` in `shift`.
    ///
    /// Addon choices survive only when the shift is unchanged.
    pub fn select_time(&mut self, shift: &Shift, time: DecimalTime) {
        if self.selected_shift.as_ref() != Some(&shift.uid) {
            self.addons = AddonSelection::for_policy(shift.usage);
        }
        self.selected_time = Some(time);
        self.selected_shift = Some(shift.uid.clone());
        self.policy = shift.usage;
    }
}

/// The complete state of one booking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// The session's notion of today; earlier dates are rejected.
    pub today: Date,
    /// The guest's selection.
    pub selection: SelectionState,
    /// The availability data backing the selection.
    pub availability: AvailabilityStatus,
    /// Set on the first render after a fetch; cleared once the guest picks an
    /// area or changes an input.
    pub initial_render_cycle: bool,
    /// The unresolved date/party-size problem, if any.
    pub input_issue: Option<InputIssue>,
    last_ticket: u64,
}

impl State {
    /// Creates the initial session state: today's date and no party size.
    #[must_use]
    pub const fn new(today: Date) -> Self {
        Self {
            today,
            selection: SelectionState::new(today),
            availability: AvailabilityStatus::Idle,
            initial_render_cycle: false,
            input_issue: None,
            last_ticket: 0,
        }
    }

    /// Issues the next fetch ticket.
    pub(crate) const fn issue_ticket(&mut self) -> FetchTicket {
        self.last_ticket += 1;
        FetchTicket(self.last_ticket)
    }

    /// The ticket whose result is awaited, if a fetch is in flight.
    #[must_use]
    pub const fn pending_ticket(&self) -> Option<FetchTicket> {
        match self.availability {
            AvailabilityStatus::Loading { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Returns whether `ticket` is the pending fetch.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.pending_ticket() == Some(ticket)
    }

    /// The shift of the selected time, resolved against loaded availability.
    #[must_use]
    pub fn active_shift(&self) -> Option<&Shift> {
        let availability: &Availability = self.availability.loaded()?;
        availability.shift(self.selection.selected_shift.as_ref()?)
    }

    /// Builds the slot board the guest can currently pick from.
    ///
    /// Returns `Ok(None)` when area selection is on but no area could be
    /// chosen: no time is selectable in that state.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected area is missing from `availability`.
    pub fn slot_board(
        &self,
        availability: &Availability,
        config: &BookingConfig,
    ) -> Result<Option<SlotBoard>, DomainError> {
        if config.area_selection && self.selection.area.is_none() {
            return Ok(None);
        }
        resolve_slot_board(
            availability,
            self.selection.area.as_ref(),
            self.initial_render_cycle,
            config,
        )
        .map(Some)
    }

    /// The addon engine for the active shift and party size.
    #[must_use]
    pub fn addon_engine(&self) -> Option<AddonEngine<'_>> {
        self.active_shift()
            .map(|shift| AddonEngine::for_shift(shift, self.selection.covers))
    }

    /// Evaluates the progress gate from scratch.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let addons_complete: bool = self
            .addon_engine()
            .is_none_or(|engine| engine.is_complete(&self.selection.addons));
        evaluate_progress(
            self.selection.selected_time.is_some(),
            self.selection.policy,
            addons_complete,
        )
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// What the driver must do next, if anything.
    pub effect: Option<Effect>,
}

/// A request to fetch availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// The ticket to complete the fetch with.
    pub ticket: FetchTicket,
    /// The requested date.
    pub date: Date,
    /// The requested party size.
    pub covers: u32,
    /// Whether the trigger was a stepper or free-text input.
    pub debounce: bool,
}

/// Side effects produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Issue an availability fetch.
    Fetch(FetchRequest),
    /// A completed fetch was not the pending one and was ignored.
    StaleResponseDiscarded {
        /// The ignored ticket.
        ticket: FetchTicket,
    },
    /// A quantity change was a no-op.
    AddonRejected {
        /// The addon the change targeted.
        addon: AddonUid,
        /// Why it was rejected.
        outcome: QuantityOutcome,
    },
}
