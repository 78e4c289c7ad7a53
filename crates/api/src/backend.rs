// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::BackendError;
use crate::request_response::{AvailabilityQuery, HoldBody, HoldResponse};
use async_trait::async_trait;
use tablehold_domain::RawAvailability;

/// The remote service that answers availability and hold requests.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Fetches one day's availability.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] on transport failure, a non-success status
    /// or an undecodable body.
    async fn fetch_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<RawAvailability, BackendError>;

    /// Places a temporary hold for establishment `est`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] on transport failure, a non-success status
    /// or an undecodable body.
    async fn hold(&self, est: &str, body: &HoldBody) -> Result<HoldResponse, BackendError>;
}
