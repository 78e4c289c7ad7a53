// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use tablehold_domain::{AreaChoice, DecimalTime, DomainError, ShiftUid};

/// Why a hold request cannot be assembled yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldBlocker {
    /// No establishment id was supplied.
    MissingEstablishment,
    /// No party size is chosen.
    MissingCovers,
    /// No time slot is selected.
    MissingTime,
    /// The date or party size has an unresolved input issue.
    InvalidInput,
    /// The active addon policy is not satisfied.
    AddonsIncomplete,
}

impl std::fmt::Display for HoldBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEstablishment => write!(f, "establishment id is missing"),
            Self::MissingCovers => write!(f, "number of guests is missing"),
            Self::MissingTime => write!(f, "no time slot is selected"),
            Self::InvalidInput => write!(f, "date or number of guests is invalid"),
            Self::AddonsIncomplete => write!(f, "addon selection is incomplete"),
        }
    }
}

/// Errors that can occur during state transitions.
///
/// A failed transition leaves the state untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The command needs loaded availability.
    #[error("availability has not been loaded")]
    AvailabilityNotLoaded,
    /// Area selection is disabled by configuration.
    #[error("area selection is disabled")]
    AreaSelectionDisabled,
    /// The area cannot be chosen for the current availability.
    #[error("area '{0}' has no availability for this selection")]
    AreaUnavailable(AreaChoice),
    /// The time button is not available.
    #[error("time {time:?} in shift '{shift}' is not selectable")]
    SlotNotSelectable {
        /// The requested shift.
        shift: ShiftUid,
        /// The requested time.
        time: DecimalTime,
    },
    /// An addon command arrived with no time selected.
    #[error("no shift is active; select a time first")]
    NoActiveShift,
    /// A hold was requested before its required fields were present.
    #[error("hold request is not ready: {reason}")]
    HoldNotReady {
        /// The first missing requirement.
        reason: HoldBlocker,
    },
}
