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

mod addons;
mod area;
mod availability;
mod config;
mod error;
mod pricing;
mod progress;
mod slots;
mod time_format;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use addons::{
    AddonControl, AddonEngine, AddonQuantity, AddonSelection, QuantityOutcome, SelectedAddon,
};
pub use area::{
    AreaOption, any_area_is_available, area_is_available, area_options, choice_is_available,
    resolve_area,
};
pub use availability::{RawAddon, RawArea, RawAvailability, RawShift, RawUid, parse_availability};
pub use config::{BookingConfig, LanguageStrings};
pub use pricing::{AddonSummary, PriceLine, addon_cost_minor, encode_addons, format_minor};
pub use progress::{Progress, evaluate_progress};
pub use slots::{
    AreaFilter, BoardNotice, ShiftSlots, SlotBoard, SlotState, TimeSlot, resolve_shift_slots,
    resolve_slot_board, slot_state,
};
pub use time_format::{format_date, format_decimal_time};

// Re-export public types
pub use error::DomainError;
pub use types::{
    AddonDef, AddonUid, Area, AreaChoice, AreaUid, Availability, DecimalTime, PricePer, Shift,
    ShiftUid, UsagePolicy,
};
pub use validation::{
    CoversStep, InputIssue, parse_covers_input, parse_date, step_covers, validate_booking_input,
};
