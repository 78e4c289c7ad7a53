// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod controller;
mod error;
mod hold;
mod state;
mod view;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::{Command, FetchOutcome};
pub use controller::{Controller, Update};
pub use error::{CoreError, HoldBlocker};
pub use hold::{HoldRequest, build_hold_request};
pub use state::{
    AvailabilityStatus, Effect, FetchRequest, FetchTicket, SelectionState, State,
    TransitionResult,
};
pub use view::{AddonPanelView, AreaPickerView, BookingView, SummaryView, TimesView, render};
