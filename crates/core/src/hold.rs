// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{CoreError, HoldBlocker};
use crate::state::State;
use serde::{Deserialize, Serialize};
use tablehold_domain::{
    AddonSummary, AreaChoice, BookingConfig, DecimalTime, SelectedAddon, format_date,
};

/// A validated request to place a temporary hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldRequest {
    /// The establishment id.
    pub est: String,
    /// The guest language.
    pub lng: String,
    /// The party size.
    pub covers: u32,
    /// The date as `YYYY-MM-DD`.
    pub date: String,
    /// The selected decimal time.
    pub time: DecimalTime,
    /// The chosen area uid; absent for "any" or when area selection is off.
    pub area: Option<String>,
    /// Comma-separated `uid:quantity` pairs.
    pub addons: String,
}

/// Assembles a hold request from the current selection.
///
/// Required fields are checked before anything leaves the process. An empty
/// `lng` falls back to the configured language.
///
/// # Errors
///
/// Returns [`CoreError::HoldNotReady`] naming the first missing requirement.
pub fn build_hold_request(
    config: &BookingConfig,
    state: &State,
    est: &str,
    lng: &str,
) -> Result<HoldRequest, CoreError> {
    let blocked = |reason: HoldBlocker| CoreError::HoldNotReady { reason };

    if est.trim().is_empty() {
        return Err(blocked(HoldBlocker::MissingEstablishment));
    }
    if state.input_issue.is_some() {
        return Err(blocked(HoldBlocker::InvalidInput));
    }
    if state.selection.covers == 0 {
        return Err(blocked(HoldBlocker::MissingCovers));
    }
    let time: DecimalTime = state
        .selection
        .selected_time
        .ok_or_else(|| blocked(HoldBlocker::MissingTime))?;
    if !state.progress().is_ready() {
        return Err(blocked(HoldBlocker::AddonsIncomplete));
    }

    let selected: Vec<SelectedAddon<'_>> = state
        .addon_engine()
        .map(|engine| engine.selected(&state.selection.addons))
        .unwrap_or_default();
    let addons: String = AddonSummary::from_selected(&selected, state.selection.covers).api_string();

    let area: Option<String> = match &state.selection.area {
        Some(AreaChoice::Specific(uid)) if config.area_selection => Some(uid.to_string()),
        _ => None,
    };
    let lng: String = if lng.trim().is_empty() {
        config.language.clone()
    } else {
        lng.trim().to_string()
    };

    Ok(HoldRequest {
        est: est.trim().to_string(),
        lng,
        covers: state.selection.covers,
        date: format_date(state.selection.date),
        time,
        area,
        addons,
    })
}
