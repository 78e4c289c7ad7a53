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

mod backend;
mod client;
mod error;
mod fixture;
mod http;
mod request_response;

#[cfg(test)]
mod tests;

pub use backend::BookingBackend;
pub use client::{BookingClient, DEFAULT_DEBOUNCE};
pub use error::{ApiError, BackendError};
pub use fixture::FixtureBackend;
pub use http::{DEFAULT_BASE_URL, HttpBookingBackend};
pub use request_response::{
    AvailabilityQuery, HoldBody, HoldError, HoldOutcome, HoldResponse,
};
