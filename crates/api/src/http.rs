// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::backend::BookingBackend;
use crate::error::BackendError;
use crate::request_response::{AvailabilityQuery, HoldBody, HoldResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tablehold_domain::RawAvailability;
use tracing::{debug, warn};

/// The public booking service.
pub const DEFAULT_BASE_URL: &str = "https://nz.eveve.com";

/// [`BookingBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBookingBackend {
    client: Client,
    base_url: String,
}

impl HttpBookingBackend {
    /// Creates a backend rooted at `base_url`, without a trailing slash.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The URL of the availability endpoint.
    #[must_use]
    pub fn availability_url(&self) -> String {
        format!("{}/web/day-avail", self.base_url)
    }

    /// The URL of the hold endpoint for `est`.
    #[must_use]
    pub fn hold_url(&self, est: &str) -> String {
        format!("{}/restaurants/{est}/books", self.base_url)
    }
}

impl Default for HttpBookingBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body: String = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "Backend returned an error status");
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl BookingBackend for HttpBookingBackend {
    async fn fetch_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<RawAvailability, BackendError> {
        let url: String = self.availability_url();
        debug!(url = %url, est = %query.est, date = %query.date, covers = query.covers, "GET availability");
        let response: Response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        decode(response).await
    }

    async fn hold(&self, est: &str, body: &HoldBody) -> Result<HoldResponse, BackendError> {
        let url: String = self.hold_url(est);
        debug!(url = %url, "POST hold");
        let response: Response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        decode(response).await
    }
}
