// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::{Command, FetchOutcome};
use crate::error::CoreError;
use crate::hold::{HoldRequest, build_hold_request};
use crate::state::{Effect, FetchRequest, FetchTicket, State, TransitionResult};
use crate::view::{BookingView, render};
use tablehold_domain::{
    AddonUid, AreaChoice, BookingConfig, CoversStep, DecimalTime, QuantityOutcome, ShiftUid,
};
use time::Date;

/// What a named operation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// The freshly derived view.
    pub view: BookingView,
    /// A fetch the driver must perform.
    pub fetch: Option<FetchRequest>,
    /// Set when a fetch result was ignored because a newer one is pending.
    pub stale_response: Option<FetchTicket>,
    /// Set when a quantity change was a no-op.
    pub addon_rejected: Option<QuantityOutcome>,
}

/// Owns the session state and the configuration snapshot.
///
/// State changes only through the named operations below, each of which
/// returns a freshly derived view.
#[derive(Debug, Clone)]
pub struct Controller {
    config: BookingConfig,
    state: State,
}

impl Controller {
    /// Starts a session for `today` with no party size chosen.
    #[must_use]
    pub const fn new(config: BookingConfig, today: Date) -> Self {
        Self {
            config,
            state: State::new(today),
        }
    }

    /// The configuration snapshot.
    #[must_use]
    pub const fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Derives the view for the current state.
    #[must_use]
    pub fn view(&self) -> BookingView {
        render(&self.config, &self.state)
    }

    /// Returns whether `ticket` is the fetch currently awaited.
    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.state.is_current(ticket)
    }

    /// Applies a command and, on success, replaces the state.
    ///
    /// # Errors
    ///
    /// Returns the [`CoreError`] from [`apply`]; the state is unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<Update, CoreError> {
        let TransitionResult { new_state, effect } = apply(&self.config, &self.state, command)?;
        self.state = new_state;

        let mut update: Update = Update {
            view: self.view(),
            fetch: None,
            stale_response: None,
            addon_rejected: None,
        };
        match effect {
            Some(Effect::Fetch(request)) => update.fetch = Some(request),
            Some(Effect::StaleResponseDiscarded { ticket }) => update.stale_response = Some(ticket),
            Some(Effect::AddonRejected { outcome, .. }) => update.addon_rejected = Some(outcome),
            None => {}
        }
        Ok(update)
    }

    /// Chooses the booking date.
    ///
    /// # Errors
    ///
    /// Propagates any [`CoreError`] from the transition.
    pub fn set_date(&mut self, date: Date) -> Result<Update, CoreError> {
        self.dispatch(Command::SetDate { date })
    }

    /// Sets the party size directly.
    ///
    /// # Errors
    ///
    /// Propagates any [`CoreError`] from the transition.
    pub fn set_covers(&mut self, covers: u32) -> Result<Update, CoreError> {
        self.dispatch(Command::SetCovers { covers })
    }

    /// Clicks a party size stepper button.
    ///
    /// # Errors
    ///
    /// Propagates any [`CoreError`] from the transition.
    pub fn step_covers(&mut self, step: CoversStep) -> Result<Update, CoreError> {
        self.dispatch(Command::StepCovers { step })
    }

    /// Types a party size.
    ///
    /// # Errors
    ///
    /// Propagates any [`CoreError`] from the transition.
    pub fn enter_covers(&mut self, text: &str) -> Result<Update, CoreError> {
        self.dispatch(Command::EnterCovers {
            text: text.to_string(),
        })
    }

    /// Chooses a dining area.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is loaded, area selection is disabled, or
    /// the area is unknown or unavailable.
    pub fn select_area(&mut self, choice: AreaChoice) -> Result<Update, CoreError> {
        self.dispatch(Command::SelectArea { choice })
    }

    /// Clicks a time button.
    ///
    /// # Errors
    ///
    /// Returns an error if the button is not available.
    pub fn select_time(&mut self, shift: ShiftUid, time: DecimalTime) -> Result<Update, CoreError> {
        self.dispatch(Command::SelectTime { shift, time })
    }

    /// Usage 1 addon toggle.
    ///
    /// # Errors
    ///
    /// Returns an error if no shift is active, the policy differs, or the
    /// addon is not eligible.
    pub fn toggle_single_addon(&mut self, addon: AddonUid) -> Result<Update, CoreError> {
        self.dispatch(Command::ToggleSingleAddon { addon })
    }

    /// Usage 2 plus button.
    ///
    /// # Errors
    ///
    /// Returns an error if no shift is active, the policy differs, or the
    /// addon is not eligible.
    pub fn increment_addon(&mut self, addon: AddonUid) -> Result<Update, CoreError> {
        self.dispatch(Command::IncrementAddon { addon })
    }

    /// Usage 2 minus button.
    ///
    /// # Errors
    ///
    /// Returns an error if no shift is active, the policy differs, or the
    /// addon is not eligible.
    pub fn decrement_addon(&mut self, addon: AddonUid) -> Result<Update, CoreError> {
        self.dispatch(Command::DecrementAddon { addon })
    }

    /// Usage 3 addon toggle.
    ///
    /// # Errors
    ///
    /// Returns an error if no shift is active, the policy differs, or the
    /// addon is not eligible.
    pub fn toggle_multi_addon(&mut self, addon: AddonUid) -> Result<Update, CoreError> {
        self.dispatch(Command::ToggleMultiAddon { addon })
    }

    /// Delivers a fetch result; stale tickets are ignored.
    ///
    /// # Errors
    ///
    /// Propagates any [`CoreError`] from the transition.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: FetchOutcome,
    ) -> Result<Update, CoreError> {
        self.dispatch(Command::CompleteFetch { ticket, outcome })
    }

    /// Assembles the hold request for the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::HoldNotReady`] if a required field is missing or
    /// the progress gate is blocked.
    pub fn hold_request(&self, est: &str, lng: &str) -> Result<HoldRequest, CoreError> {
        build_hold_request(&self.config, &self.state, est, lng)
    }
}
