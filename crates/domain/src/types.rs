// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Identifies a shift within one availability payload.
    ShiftUid
);
string_id!(
    /// Identifies a physical dining area.
    AreaUid
);
string_id!(
    /// Identifies an addon within a shift's catalog.
    AddonUid
);

/// A time of day in decimal hours (`18.5` is 6:30 PM).
///
/// A negative value is a sentinel: the slot exists on the grid but is not
/// offered. That is distinct from the value being absent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecimalTime(f64);

impl DecimalTime {
    /// Wraps a decimal hour value.
    #[must_use]
    pub const fn new(hours: f64) -> Self {
        Self(hours)
    }

    /// Returns the raw decimal hour value.
    #[must_use]
    pub const fn hours(self) -> f64 {
        self.0
    }

    /// Returns whether the slot is offered, i.e. not a negative sentinel.
    #[must_use]
    pub fn is_offered(self) -> bool {
        self.0 >= 0.0
    }
}

impl From<f64> for DecimalTime {
    fn from(hours: f64) -> Self {
        Self(hours)
    }
}

/// The area a guest has picked.
///
/// `Any` is a policy value meaning "no area filter"; it is not a real area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AreaChoice {
    /// No area filter.
    Any,
    /// A specific physical area.
    Specific(AreaUid),
}

impl AreaChoice {
    /// The wire value used for the synthetic "any" option.
    pub const ANY: &'static str = "any";

    /// Returns the specific area, if one was chosen.
    #[must_use]
    pub const fn specific(&self) -> Option<&AreaUid> {
        match self {
            Self::Any => None,
            Self::Specific(uid) => Some(uid),
        }
    }

    /// Returns the wire value for this choice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => Self::ANY,
            Self::Specific(uid) => uid.as_str(),
        }
    }
}

impl From<String> for AreaChoice {
    fn from(value: String) -> Self {
        if value == Self::ANY {
            Self::Any
        } else {
            Self::Specific(AreaUid::new(value))
        }
    }
}

impl From<&str> for AreaChoice {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AreaChoice> for String {
    fn from(choice: AreaChoice) -> Self {
        match choice {
            AreaChoice::Any => AreaChoice::ANY.to_string(),
            AreaChoice::Specific(uid) => uid.0,
        }
    }
}

impl fmt::Display for AreaChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a guest interacts with a shift's addons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum UsagePolicy {
    /// Usage 0: no addon interaction is required.
    NoInteraction,
    /// Usage 1: exactly one addon is chosen.
    SingleChoice,
    /// Usage 2: integer quantities that must sum to the guest count.
    Quantities,
    /// Usage 3: any subset, no quantity constraint.
    MultiChoice,
}

impl UsagePolicy {
    /// Returns the numeric code used on the wire.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::NoInteraction => 0,
            Self::SingleChoice => 1,
            Self::Quantities => 2,
            Self::MultiChoice => 3,
        }
    }
}

impl TryFrom<i64> for UsagePolicy {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoInteraction),
            1 => Ok(Self::SingleChoice),
            2 => Ok(Self::Quantities),
            3 => Ok(Self::MultiChoice),
            other => Err(DomainError::UnknownUsagePolicy(other)),
        }
    }
}

impl From<UsagePolicy> for i64 {
    fn from(policy: UsagePolicy) -> Self {
        policy.code()
    }
}

/// Whether an addon price applies per guest or once per party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PricePer {
    /// Charged for each guest.
    Guest,
    /// Charged once for the whole party.
    #[default]
    Party,
}

impl FromStr for PricePer {
    type Err = std::convert::Infallible;

    /// Anything other than `Guest` is charged at the flat party rate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("guest") {
            Ok(Self::Guest)
        } else {
            Ok(Self::Party)
        }
    }
}

impl fmt::Display for PricePer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => f.write_str("Guest"),
            Self::Party => f.write_str("Party"),
        }
    }
}

/// An optional extra offered with a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonDef {
    /// The addon identifier.
    pub uid: AddonUid,
    /// Display name.
    pub name: String,
    /// Price in minor currency units (cents).
    pub price_minor: i64,
    /// Whether the price is per guest or per party.
    pub per: PricePer,
    /// Smallest eligible guest count (defaults to 1).
    pub min: Option<u32>,
    /// Largest eligible guest count (defaults to unbounded).
    pub max: Option<u32>,
    /// Free-text description.
    pub desc: String,
}

impl AddonDef {
    /// The guest-count lower bound used when `min` is absent.
    pub const DEFAULT_MIN_COVERS: u32 = 1;

    /// Returns the effective minimum guest count.
    #[must_use]
    pub fn min_covers(&self) -> u32 {
        self.min.unwrap_or(Self::DEFAULT_MIN_COVERS)
    }

    /// Returns the effective maximum guest count.
    #[must_use]
    pub fn max_covers(&self) -> u32 {
        self.max.unwrap_or(u32::MAX)
    }

    /// Returns whether a party of `covers` guests may choose this addon.
    #[must_use]
    pub fn is_eligible_for(&self, covers: u32) -> bool {
        (self.min_covers()..=self.max_covers()).contains(&covers)
    }
}

/// A named service period with its own time grid and addon catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// The shift identifier.
    pub uid: ShiftUid,
    /// Display name, e.g. "Lunch".
    pub name: String,
    /// The ordered time grid; negative entries are "not offered" sentinels.
    pub times: Vec<DecimalTime>,
    /// The addon usage policy. `None` when absent or unrecognised.
    pub usage: Option<UsagePolicy>,
    /// The addon catalog for this shift.
    pub addons: Vec<AddonDef>,
    /// Optional per-shift message for the guest.
    pub message: Option<String>,
}

impl Shift {
    /// Returns whether the shift lists `time` as an offered slot.
    #[must_use]
    pub fn offers(&self, time: DecimalTime) -> bool {
        time.is_offered() && self.times.contains(&time)
    }

    /// Returns whether the shift has at least one offered slot.
    #[must_use]
    pub fn has_offered_time(&self) -> bool {
        self.times.iter().any(|t| t.is_offered())
    }
}

/// A physical seating zone with its own time grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// The area identifier.
    pub uid: AreaUid,
    /// Display name.
    pub name: String,
    /// Every decimal time the area is open, independent of shift.
    pub times: Vec<DecimalTime>,
}

impl Area {
    /// Returns whether the area is open at `time`.
    #[must_use]
    pub fn offers(&self, time: DecimalTime) -> bool {
        time.is_offered() && self.times.contains(&time)
    }
}

/// The validated result of one availability fetch.
///
/// Immutable once built; replaced wholesale by the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// Shifts for the requested day, in payload order.
    pub shifts: Vec<Shift>,
    /// Areas configured for the establishment, in payload order.
    pub areas: Vec<Area>,
    /// The day's message, if any.
    pub message: Option<String>,
}

impl Availability {
    /// Looks up a shift by identifier.
    #[must_use]
    pub fn shift(&self, uid: &ShiftUid) -> Option<&Shift> {
        self.shifts.iter().find(|s| &s.uid == uid)
    }

    /// Looks up an area by identifier.
    #[must_use]
    pub fn area(&self, uid: &AreaUid) -> Option<&Area> {
        self.areas.iter().find(|a| &a.uid == uid)
    }
}
