// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire shapes for the availability and hold endpoints.

use serde::{Deserialize, Serialize};
use tablehold::{FetchRequest, HoldRequest};
use tablehold_domain::{DecimalTime, format_date};

/// Query parameters of the availability endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// The establishment id.
    pub est: String,
    /// The party size.
    pub covers: u32,
    /// The date as `YYYY-MM-DD`.
    pub date: String,
}

impl AvailabilityQuery {
    /// Builds the query for an issued fetch.
    #[must_use]
    pub fn for_request(est: &str, request: &FetchRequest) -> Self {
        Self {
            est: est.to_string(),
            covers: request.covers,
            date: format_date(request.date),
        }
    }
}

/// JSON body posted to the hold endpoint.
///
/// The establishment id travels in the path, not the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldBody {
    pub lng: String,
    pub covers: u32,
    pub date: String,
    pub time: DecimalTime,
    /// Serialized as `null` when no specific area applies.
    pub area: Option<String>,
    pub addons: String,
}

impl From<&HoldRequest> for HoldBody {
    fn from(request: &HoldRequest) -> Self {
        Self {
            lng: request.lng.clone(),
            covers: request.covers,
            date: request.date.clone(),
            time: request.time,
            area: request.area.clone(),
            addons: request.addons.clone(),
        }
    }
}

/// A business-rule error returned by the hold endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoldError {
    #[serde(default)]
    pub message: Option<String>,
}

/// The hold endpoint's response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoldResponse {
    /// Where the guest continues the booking.
    #[serde(default)]
    pub url: Option<String>,
    /// Set when the hold was refused.
    #[serde(default)]
    pub error: Option<HoldError>,
}

/// A successfully placed hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HoldOutcome {
    /// The guest continues at `url`.
    Continue { url: String },
    /// The server accepted the hold without a continuation reference.
    Accepted,
}
