// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AddonUid, AreaUid, ShiftUid, UsagePolicy};

/// Errors that can occur while interpreting availability data or applying
/// selection rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The payload carried no usable shifts.
    ///
    /// Callers treat this as "no availability", never as a crash.
    #[error("no shifts are available for the requested date and party size")]
    NoAvailability,
    /// The payload could not be decoded.
    #[error("malformed availability payload: {0}")]
    MalformedPayload(String),
    /// A usage policy outside the known range was supplied.
    #[error("unknown addon usage policy {0}")]
    UnknownUsagePolicy(i64),
    /// The referenced shift does not exist in the current availability.
    #[error("shift '{0}' is not part of the current availability")]
    UnknownShift(ShiftUid),
    /// The referenced area does not exist in the current availability.
    #[error("area '{0}' is not part of the current availability")]
    UnknownArea(AreaUid),
    /// The referenced addon is not in the eligible list for the active shift.
    #[error("addon '{0}' is not offered for this shift and party size")]
    UnknownAddon(AddonUid),
    /// An addon operation was attempted under a different usage policy.
    #[error("addon operation requires usage policy {required:?}, but the active policy is {active:?}")]
    PolicyMismatch {
        /// The policy the operation belongs to.
        required: UsagePolicy,
        /// The policy of the active shift.
        active: Option<UsagePolicy>,
    },
    /// The configuration snapshot could not be decoded.
    #[error("invalid booking configuration: {0}")]
    InvalidConfig(String),
    /// A date string could not be parsed.
    #[error("invalid date '{date_string}': {error}")]
    DateParseError {
        /// The rejected input.
        date_string: String,
        /// The parser message.
        error: String,
    },
}
