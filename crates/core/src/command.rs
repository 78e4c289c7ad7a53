// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::FetchTicket;
use serde::{Deserialize, Serialize};
use tablehold_domain::{AddonUid, AreaChoice, CoversStep, DecimalTime, RawAvailability, ShiftUid};
use time::Date;

/// A command represents guest or driver intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Choose the booking date.
    SetDate {
        /// The new date.
        date: Date,
    },
    /// Set the party size directly. Zero clears the session.
    SetCovers {
        /// The new party size.
        covers: u32,
    },
    /// Click a party size stepper button.
    StepCovers {
        /// The direction.
        step: CoversStep,
    },
    /// Type a party size into the free-text input.
    EnterCovers {
        /// The raw text.
        text: String,
    },
    /// Choose a dining area.
    SelectArea {
        /// The chosen area or "any".
        choice: AreaChoice,
    },
    /// Click a time button.
    SelectTime {
        /// The shift the button belongs to.
        shift: ShiftUid,
        /// The button's time.
        time: DecimalTime,
    },
    /// Usage 1: choose or toggle an addon.
    ToggleSingleAddon {
        /// The addon.
        addon: AddonUid,
    },
    /// Usage 2: add one to an addon's quantity.
    IncrementAddon {
        /// The addon.
        addon: AddonUid,
    },
    /// Usage 2: remove one from an addon's quantity.
    DecrementAddon {
        /// The addon.
        addon: AddonUid,
    },
    /// Usage 3: toggle an addon.
    ToggleMultiAddon {
        /// The addon.
        addon: AddonUid,
    },
    /// Deliver the result of an availability fetch.
    CompleteFetch {
        /// The ticket the fetch was issued with.
        ticket: FetchTicket,
        /// What the fetch produced.
        outcome: FetchOutcome,
    },
}

/// The result of an availability fetch as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The server answered with a payload.
    Payload {
        /// The decoded body, not yet validated.
        payload: RawAvailability,
    },
    /// Network failure, non-success status or an undecodable body.
    Failed {
        /// A description of the failure.
        reason: String,
    },
}
