// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, FetchOutcome};
use crate::error::CoreError;
use crate::state::{
    AvailabilityStatus, Effect, FetchRequest, FetchTicket, State, TransitionResult,
};
use tablehold_domain::{
    AddonEngine, AddonUid, AreaChoice, Availability, BookingConfig, DecimalTime, DomainError,
    QuantityOutcome, RawAvailability, Shift, ShiftUid, SlotBoard, choice_is_available,
    parse_covers_input, resolve_area, step_covers, validate_booking_input,
};
use tracing::{debug, info, warn};

/// Applies a command to the current state, producing a new state and an
/// optional effect for the driver.
///
/// This function is pure: the input state is never modified, and a failed
/// command produces no partial change.
///
/// # Arguments
///
/// * `config` - The read-only booking configuration
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and effect
/// * `Err(CoreError)` if the command is not valid in the current state
///
/// # Errors
///
/// Returns an error if:
/// - The command needs loaded availability and none is loaded
/// - The area, time slot or addon is not selectable
/// - An addon command does not match the active usage policy
pub fn apply(
    config: &BookingConfig,
    state: &State,
    command: Command,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SetDate { date } => {
            let mut new_state: State = state.clone();
            new_state.selection.date = date;
            Ok(begin_refresh(config, new_state, false))
        }
        Command::SetCovers { covers } => {
            let mut new_state: State = state.clone();
            new_state.selection.covers = covers;
            Ok(begin_refresh(config, new_state, false))
        }
        Command::StepCovers { step } => {
            match step_covers(state.selection.covers, step, config) {
                Some(covers) => {
                    let mut new_state: State = state.clone();
                    new_state.selection.covers = covers;
                    Ok(begin_refresh(config, new_state, true))
                }
                None => Ok(unchanged(state)),
            }
        }
        Command::EnterCovers { text } => {
            let covers: u32 = parse_covers_input(&text, config);
            if covers == state.selection.covers && state.input_issue.is_none() {
                return Ok(unchanged(state));
            }
            let mut new_state: State = state.clone();
            new_state.selection.covers = covers;
            Ok(begin_refresh(config, new_state, true))
        }
        Command::CompleteFetch { ticket, outcome } => complete_fetch(config, state, ticket, outcome),
        Command::SelectArea { choice } => select_area(config, state, choice),
        Command::SelectTime { shift, time } => select_time(config, state, &shift, time),
        Command::ToggleSingleAddon { addon } => with_addon_engine(state, |engine, new_state| {
            engine.toggle_single(&mut new_state.selection.addons, &addon)?;
            Ok(None)
        }),
        Command::IncrementAddon { addon } => with_addon_engine(state, |engine, new_state| {
            let outcome: QuantityOutcome =
                engine.increment(&mut new_state.selection.addons, &addon)?;
            Ok(rejection(addon, outcome))
        }),
        Command::DecrementAddon { addon } => with_addon_engine(state, |engine, new_state| {
            let outcome: QuantityOutcome =
                engine.decrement(&mut new_state.selection.addons, &addon)?;
            Ok(rejection(addon, outcome))
        }),
        Command::ToggleMultiAddon { addon } => with_addon_engine(state, |engine, new_state| {
            engine.toggle_multi(&mut new_state.selection.addons, &addon)?;
            Ok(None)
        }),
    }
}

fn unchanged(state: &State) -> TransitionResult {
    TransitionResult {
        new_state: state.clone(),
        effect: None,
    }
}

fn rejection(addon: AddonUid, outcome: QuantityOutcome) -> Option<Effect> {
    match outcome {
        QuantityOutcome::Applied(_) => None,
        QuantityOutcome::RejectedAtCapacity | QuantityOutcome::RejectedAtZero => {
            Some(Effect::AddonRejected { addon, outcome })
        }
    }
}

/// Starts a new fetch after the date or party size changed.
///
/// The current time (or the time still waiting to be restored from an
/// earlier in-flight fetch) becomes the sticky time. An input issue blocks
/// the fetch and invalidates any pending ticket.
fn begin_refresh(config: &BookingConfig, mut state: State, debounce: bool) -> TransitionResult {
    let sticky_time: Option<DecimalTime> = match &state.availability {
        AvailabilityStatus::Loading { sticky_time, .. } => {
            state.selection.selected_time.or(*sticky_time)
        }
        _ => state.selection.selected_time,
    };
    state.selection.clear_time();
    state.initial_render_cycle = false;

    if let Some(issue) = validate_booking_input(
        state.selection.date,
        state.today,
        state.selection.covers,
        config,
    ) {
        debug!(issue = ?issue, "Input blocks availability fetch");
        state.input_issue = Some(issue);
        state.availability = AvailabilityStatus::Idle;
        return TransitionResult {
            new_state: state,
            effect: None,
        };
    }

    state.input_issue = None;
    let ticket: FetchTicket = state.issue_ticket();
    state.availability = AvailabilityStatus::Loading {
        ticket,
        sticky_time,
    };
    let request: FetchRequest = FetchRequest {
        ticket,
        date: state.selection.date,
        covers: state.selection.covers,
        debounce,
    };
    info!(
        ticket = %ticket,
        date = %request.date,
        covers = request.covers,
        debounce,
        "Issuing availability fetch"
    );
    TransitionResult {
        new_state: state,
        effect: Some(Effect::Fetch(request)),
    }
}

fn complete_fetch(
    config: &BookingConfig,
    state: &State,
    ticket: FetchTicket,
    outcome: FetchOutcome,
) -> Result<TransitionResult, CoreError> {
    let AvailabilityStatus::Loading { sticky_time, .. } = &state.availability else {
        debug!(ticket = %ticket, "Discarding fetch result with nothing pending");
        return Ok(discarded(state, ticket));
    };
    if !state.is_current(ticket) {
        debug!(
            ticket = %ticket,
            pending = ?state.pending_ticket(),
            "Discarding stale fetch result"
        );
        return Ok(discarded(state, ticket));
    }
    let sticky_time: Option<DecimalTime> = *sticky_time;

    let mut new_state: State = state.clone();
    new_state.selection.clear_time();

    match outcome {
        FetchOutcome::Failed { reason } => {
            warn!(ticket = %ticket, reason = %reason, "Availability fetch failed");
            new_state.availability = AvailabilityStatus::Failed { reason };
        }
        FetchOutcome::Payload { payload } => {
            apply_payload(config, &mut new_state, ticket, payload, sticky_time)?;
        }
    }

    Ok(TransitionResult {
        new_state,
        effect: None,
    })
}

fn discarded(state: &State, ticket: FetchTicket) -> TransitionResult {
    TransitionResult {
        new_state: state.clone(),
        effect: Some(Effect::StaleResponseDiscarded { ticket }),
    }
}

fn apply_payload(
    config: &BookingConfig,
    state: &mut State,
    ticket: FetchTicket,
    payload: RawAvailability,
    sticky_time: Option<DecimalTime>,
) -> Result<(), CoreError> {
    let availability: Availability = match Availability::from_raw(payload) {
        Ok(availability) => availability,
        Err(DomainError::NoAvailability) => {
            info!(ticket = %ticket, "No availability for the requested date");
            state.availability = AvailabilityStatus::NoAvailability;
            return Ok(());
        }
        Err(e) => {
            warn!(ticket = %ticket, error = %e, "Availability payload rejected");
            state.availability = AvailabilityStatus::Failed {
                reason: e.to_string(),
            };
            return Ok(());
        }
    };

    state.initial_render_cycle = true;
    state.selection.area = resolve_area(state.selection.area.as_ref(), &availability, config);

    if let Some(time) = sticky_time {
        let board: Option<SlotBoard> = state.slot_board(&availability, config)?;
        let restored: Option<&Shift> = board
            .as_ref()
            .and_then(|board| board.find_available(time))
            .and_then(|slots| availability.shift(&slots.shift_uid));
        if let Some(shift) = restored {
            debug!(time = time.hours(), shift = %shift.uid, "Restored sticky time");
            state.selection.select_time(shift, time);
        } else {
            debug!(time = time.hours(), "Sticky time no longer available");
        }
    }

    info!(
        ticket = %ticket,
        shifts = availability.shifts.len(),
        area = ?state.selection.area,
        "Availability loaded"
    );
    state.availability = AvailabilityStatus::Loaded { availability };
    Ok(())
}

fn select_area(
    config: &BookingConfig,
    state: &State,
    choice: AreaChoice,
) -> Result<TransitionResult, CoreError> {
    let availability: &Availability = state
        .availability
        .loaded()
        .ok_or(CoreError::AvailabilityNotLoaded)?;
    if !config.area_selection {
        return Err(CoreError::AreaSelectionDisabled);
    }
    if let AreaChoice::Specific(uid) = &choice
        && availability.area(uid).is_none()
    {
        return Err(DomainError::UnknownArea(uid.clone()).into());
    }
    if !choice_is_available(&choice, availability, config) {
        return Err(CoreError::AreaUnavailable(choice));
    }

    let mut new_state: State = state.clone();
    new_state.selection.area = Some(choice);
    new_state.initial_render_cycle = false;

    // Keep the selected time only if it is still bookable in the new area.
    if let (Some(shift), Some(time)) = (
        state.selection.selected_shift.as_ref(),
        state.selection.selected_time,
    ) {
        let board: Option<SlotBoard> = new_state.slot_board(availability, config)?;
        if !board.is_some_and(|board| board.is_selectable(shift, time)) {
            new_state.selection.clear_time();
        }
    }

    debug!(area = ?new_state.selection.area, "Area selected");
    Ok(TransitionResult {
        new_state,
        effect: None,
    })
}

fn select_time(
    config: &BookingConfig,
    state: &State,
    shift_uid: &ShiftUid,
    time: DecimalTime,
) -> Result<TransitionResult, CoreError> {
    let availability: &Availability = state
        .availability
        .loaded()
        .ok_or(CoreError::AvailabilityNotLoaded)?;
    let shift: &Shift = availability
        .shift(shift_uid)
        .ok_or_else(|| DomainError::UnknownShift(shift_uid.clone()))?;
    let board: Option<SlotBoard> = state.slot_board(availability, config)?;
    if !board.is_some_and(|board| board.is_selectable(shift_uid, time)) {
        return Err(CoreError::SlotNotSelectable {
            shift: shift_uid.clone(),
            time,
        });
    }

    let mut new_state: State = state.clone();
    new_state.selection.select_time(shift, time);
    debug!(shift = %shift.uid, time = time.hours(), policy = ?shift.usage, "Time selected");
    Ok(TransitionResult {
        new_state,
        effect: None,
    })
}

fn with_addon_engine<F>(state: &State, mutate: F) -> Result<TransitionResult, CoreError>
where
    F: FnOnce(&AddonEngine<'_>, &mut State) -> Result<Option<Effect>, DomainError>,
{
    let availability: &Availability = state
        .availability
        .loaded()
        .ok_or(CoreError::AvailabilityNotLoaded)?;
    let shift_uid: &ShiftUid = state
        .selection
        .selected_shift
        .as_ref()
        .ok_or(CoreError::NoActiveShift)?;
    let shift: &Shift = availability
        .shift(shift_uid)
        .ok_or_else(|| DomainError::UnknownShift(shift_uid.clone()))?;
    let engine: AddonEngine<'_> = AddonEngine::for_shift(shift, state.selection.covers);

    let mut new_state: State = state.clone();
    let effect: Option<Effect> = mutate(&engine, &mut new_state)?;
    debug!(addons = ?new_state.selection.addons, "Addon selection updated");
    Ok(TransitionResult { new_state, effect })
}
