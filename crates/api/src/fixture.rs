// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-process backend serving canned responses.

use crate::backend::BookingBackend;
use crate::error::BackendError;
use crate::request_response::{AvailabilityQuery, HoldBody, HoldResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tablehold_domain::RawAvailability;
use tokio::sync::Mutex;
use tracing::debug;

/// [`BookingBackend`] answering from fixed payloads.
///
/// Payloads and latencies may be set per date; unset dates fall back to the
/// defaults. Every request is recorded.
#[derive(Debug, Default)]
pub struct FixtureBackend {
    payload: RawAvailability,
    by_date: HashMap<String, RawAvailability>,
    latency: Duration,
    latency_by_date: HashMap<String, Duration>,
    failure: Option<BackendError>,
    hold_response: HoldResponse,
    fetches: Mutex<Vec<AvailabilityQuery>>,
    holds: Mutex<Vec<(String, HoldBody)>>,
}

impl FixtureBackend {
    /// Serves `payload` for every date.
    #[must_use]
    pub fn new(payload: RawAvailability) -> Self {
        Self {
            payload,
            ..Self::default()
        }
    }

    /// Serves `payload` for `date` (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_date(mut self, date: &str, payload: RawAvailability) -> Self {
        self.by_date.insert(date.to_string(), payload);
        self
    }

    /// Delays every availability response.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delays availability responses for `date`.
    #[must_use]
    pub fn with_date_latency(mut self, date: &str, latency: Duration) -> Self {
        self.latency_by_date.insert(date.to_string(), latency);
        self
    }

    /// Fails every availability request with `error`.
    #[must_use]
    pub fn failing(mut self, error: BackendError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Answers holds with `response`.
    #[must_use]
    pub fn with_hold_response(mut self, response: HoldResponse) -> Self {
        self.hold_response = response;
        self
    }

    /// Every availability query received so far.
    pub async fn fetches(&self) -> Vec<AvailabilityQuery> {
        self.fetches.lock().await.clone()
    }

    /// Every hold received so far, with its establishment id.
    pub async fn holds(&self) -> Vec<(String, HoldBody)> {
        self.holds.lock().await.clone()
    }
}

#[async_trait]
impl BookingBackend for FixtureBackend {
    async fn fetch_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<RawAvailability, BackendError> {
        self.fetches.lock().await.push(query.clone());

        let latency: Duration = self
            .latency_by_date
            .get(&query.date)
            .copied()
            .unwrap_or(self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        debug!(date = %query.date, covers = query.covers, "Serving fixture availability");

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(self
            .by_date
            .get(&query.date)
            .unwrap_or(&self.payload)
            .clone())
    }

    async fn hold(&self, est: &str, body: &HoldBody) -> Result<HoldResponse, BackendError> {
        self.holds
            .lock()
            .await
            .push((est.to_string(), body.clone()));
        Ok(self.hold_response.clone())
    }
}
