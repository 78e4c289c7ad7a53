// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Normalization of raw availability payloads into validated entities.
//!
//! The raw shapes are lenient on purpose: every field is optional and ids may
//! arrive as numbers or strings. Normalization is where the rules are
//! applied. Shifts without a name and areas without a uid are dropped, and a
//! payload with no surviving shifts is reported as
//! [`DomainError::NoAvailability`].

use crate::error::DomainError;
use crate::types::{
    AddonDef, AddonUid, Area, AreaUid, Availability, DecimalTime, PricePer, Shift, ShiftUid,
    UsagePolicy,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An identifier as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawUid {
    /// A numeric identifier.
    Number(i64),
    /// A textual identifier.
    Text(String),
}

impl RawUid {
    fn into_text(self) -> Option<String> {
        let text: String = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        };
        let trimmed: &str = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// A day's availability exactly as fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAvailability {
    /// The shifts for the requested day.
    #[serde(default)]
    pub shifts: Option<Vec<RawShift>>,
    /// The establishment's areas.
    #[serde(default)]
    pub areas: Option<Vec<RawArea>>,
    /// The day's message.
    #[serde(default)]
    pub message: Option<String>,
}

/// A shift exactly as fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawShift {
    #[serde(default)]
    pub uid: Option<RawUid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub times: Option<Vec<f64>>,
    #[serde(default)]
    pub usage: Option<i64>,
    #[serde(default)]
    pub addons: Option<Vec<RawAddon>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// An area exactly as fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArea {
    #[serde(default)]
    pub uid: Option<RawUid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub times: Option<Vec<f64>>,
}

/// An addon exactly as fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAddon {
    #[serde(default)]
    pub uid: Option<RawUid>,
    #[serde(default)]
    pub name: Option<String>,
    /// Price in minor units.
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub per: Option<String>,
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
    #[serde(default)]
    pub desc: Option<String>,
}

/// Decodes a JSON availability body and normalizes it.
///
/// # Errors
///
/// Returns [`DomainError::MalformedPayload`] if the body is not valid JSON of
/// the expected shape, or [`DomainError::NoAvailability`] if no usable shift
/// remains.
pub fn parse_availability(body: &str) -> Result<Availability, DomainError> {
    let raw: RawAvailability = serde_json::from_str(body)
        .map_err(|e| DomainError::MalformedPayload(e.to_string()))?;
    Availability::from_raw(raw)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

fn to_times(times: Option<Vec<f64>>) -> Vec<DecimalTime> {
    times
        .unwrap_or_default()
        .into_iter()
        .filter(|t| t.is_finite())
        .map(DecimalTime::new)
        .collect()
}

impl Availability {
    /// Builds validated availability from a raw payload.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NoAvailability`] if `shifts` is absent, empty,
    /// or empty after dropping nameless shifts.
    pub fn from_raw(raw: RawAvailability) -> Result<Self, DomainError> {
        let raw_shifts: Vec<RawShift> = match raw.shifts {
            Some(shifts) if !shifts.is_empty() => shifts,
            _ => return Err(DomainError::NoAvailability),
        };

        let shifts: Vec<Shift> = raw_shifts.into_iter().filter_map(normalize_shift).collect();
        if shifts.is_empty() {
            return Err(DomainError::NoAvailability);
        }

        let areas: Vec<Area> = raw
            .areas
            .unwrap_or_default()
            .into_iter()
            .filter_map(normalize_area)
            .collect();

        debug!(
            shifts = shifts.len(),
            areas = areas.len(),
            "Normalized availability payload"
        );

        Ok(Self {
            shifts,
            areas,
            message: non_blank(raw.message),
        })
    }
}

fn normalize_shift(raw: RawShift) -> Option<Shift> {
    let Some(name) = non_blank(raw.name) else {
        warn!("Dropping shift without a name");
        return None;
    };
    let uid: String = raw.uid.and_then(RawUid::into_text).unwrap_or_else(|| name.clone());

    let usage: Option<UsagePolicy> = match raw.usage.map(UsagePolicy::try_from) {
        None => None,
        Some(Ok(policy)) => Some(policy),
        Some(Err(e)) => {
            warn!(shift = %name, error = %e, "Ignoring unrecognised addon usage");
            None
        }
    };

    let addons: Vec<AddonDef> = raw
        .addons
        .unwrap_or_default()
        .into_iter()
        .filter_map(normalize_addon)
        .collect();

    Some(Shift {
        uid: ShiftUid::new(uid),
        name,
        times: to_times(raw.times),
        usage,
        addons,
        message: non_blank(raw.message),
    })
}

fn normalize_area(raw: RawArea) -> Option<Area> {
    let Some(uid) = raw.uid.and_then(RawUid::into_text) else {
        warn!(name = ?raw.name, "Dropping area without a uid");
        return None;
    };
    let name: String = non_blank(raw.name).unwrap_or_else(|| uid.clone());
    Some(Area {
        uid: AreaUid::new(uid),
        name,
        times: to_times(raw.times),
    })
}

fn normalize_addon(raw: RawAddon) -> Option<AddonDef> {
    let Some(uid) = raw.uid.and_then(RawUid::into_text) else {
        warn!(name = ?raw.name, "Dropping addon without a uid");
        return None;
    };
    let per: PricePer = raw
        .per
        .as_deref()
        .map_or(PricePer::Party, |p| p.parse::<PricePer>().unwrap_or_default());
    Some(AddonDef {
        name: non_blank(raw.name).unwrap_or_else(|| uid.clone()),
        uid: AddonUid::new(uid),
        price_minor: raw.price.unwrap_or(0),
        per,
        min: raw.min,
        max: raw.max,
        desc: raw.desc.unwrap_or_default(),
    })
}
