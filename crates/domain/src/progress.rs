// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::UsagePolicy;
use serde::{Deserialize, Serialize};

/// Whether the guest may advance to the next booking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    /// A required choice is missing.
    Blocked,
    /// The guest may proceed.
    Ready,
}

impl Progress {
    /// Returns `true` for [`Progress::Ready`].
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Evaluates the progress gate.
///
/// This is a pure function of its inputs and must be re-run after every
/// mutation rather than patched.
///
/// # Arguments
///
/// * `time_selected` - Whether a time slot is selected
/// * `policy` - The active shift's usage policy, if a shift is resolved
/// * `addons_complete` - The addon completeness predicate for that policy
#[must_use]
pub const fn evaluate_progress(
    time_selected: bool,
    policy: Option<UsagePolicy>,
    addons_complete: bool,
) -> Progress {
    if !time_selected {
        return Progress::Blocked;
    }
    match policy {
        None | Some(UsagePolicy::NoInteraction | UsagePolicy::MultiChoice) => Progress::Ready,
        Some(UsagePolicy::SingleChoice | UsagePolicy::Quantities) => {
            if addons_complete {
                Progress::Ready
            } else {
                Progress::Blocked
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_time_is_blocked() {
        assert_eq!(
            evaluate_progress(false, Some(UsagePolicy::NoInteraction), true),
            Progress::Blocked
        );
        assert_eq!(evaluate_progress(false, None, true), Progress::Blocked);
    }

    #[test]
    fn test_policies_that_never_block() {
        for policy in [None, Some(UsagePolicy::NoInteraction), Some(UsagePolicy::MultiChoice)] {
            assert_eq!(evaluate_progress(true, policy, false), Progress::Ready);
        }
    }

    #[test]
    fn test_policies_gated_on_completeness() {
        for policy in [UsagePolicy::SingleChoice, UsagePolicy::Quantities] {
            assert_eq!(evaluate_progress(true, Some(policy), false), Progress::Blocked);
            assert_eq!(evaluate_progress(true, Some(policy), true), Progress::Ready);
        }
    }
}
