// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The read-only booking configuration snapshot.
//!
//! Establishment configuration is exported from a page builder, so flags
//! arrive as `"true"`/`"false"` strings, counts may be quoted, and text values
//! can carry stray quotes or HTML entities. The deserializers here accept all
//! of those shapes and normalize them once at load time.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};

/// Booking configuration for one establishment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingConfig {
    /// Smallest bookable party.
    #[serde(deserialize_with = "de_count")]
    pub party_min: u32,
    /// Largest bookable party.
    #[serde(deserialize_with = "de_count")]
    pub party_max: u32,
    /// Whether the guest may choose a dining area.
    #[serde(rename = "arSelect", deserialize_with = "de_flag")]
    pub area_selection: bool,
    /// Whether the synthetic "any area" option is offered.
    #[serde(rename = "areaAny", deserialize_with = "de_flag")]
    pub area_any: bool,
    /// Whether "any area" is the default when the previous choice is lost.
    #[serde(rename = "areaAnySelected", deserialize_with = "de_flag")]
    pub area_any_default: bool,
    /// Whether negative sentinel slots are rendered as "not available".
    #[serde(deserialize_with = "de_flag")]
    pub show_unavailable_slots: bool,
    /// The guest language code.
    #[serde(rename = "usrLang", deserialize_with = "de_text")]
    pub language: String,
    /// The currency symbol used in price labels.
    #[serde(rename = "currSym", deserialize_with = "de_currency")]
    pub currency_symbol: String,
    /// Optional establishment display name.
    pub est_name: Option<String>,
    /// Guest-facing strings.
    #[serde(rename = "lng")]
    pub strings: LanguageStrings,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            party_min: 1,
            party_max: 10,
            area_selection: false,
            area_any: false,
            area_any_default: false,
            show_unavailable_slots: true,
            language: String::from("en"),
            currency_symbol: String::from("$"),
            est_name: None,
            strings: LanguageStrings::default(),
        }
    }
}

impl BookingConfig {
    /// Loads a configuration snapshot from JSON.
    ///
    /// Missing keys take their defaults. Blank language strings are replaced
    /// with the English default, and an inverted party range is reordered.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfig`] if the JSON cannot be decoded.
    pub fn from_json(body: &str) -> Result<Self, DomainError> {
        let config: Self =
            serde_json::from_str(body).map_err(|e| DomainError::InvalidConfig(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Applies the load-time normalization rules.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.party_min > self.party_max {
            std::mem::swap(&mut self.party_min, &mut self.party_max);
        }
        self.strings = self.strings.filled();
        self
    }

    /// Returns whether "any area" can be chosen at all.
    #[must_use]
    pub const fn any_area_enabled(&self) -> bool {
        self.area_selection && self.area_any
    }
}

macro_rules! language_strings {
    ($($(#[$meta:meta])* $field:ident => $default:literal,)*) => {
        /// Guest-facing strings carried into view models.
        ///
        /// Every key missing from configuration falls back to English.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct LanguageStrings {
            $($(#[$meta])* pub $field: String,)*
        }

        impl Default for LanguageStrings {
            fn default() -> Self {
                Self {
                    $($field: String::from($default),)*
                }
            }
        }

        impl LanguageStrings {
            /// Replaces blank entries with their English defaults.
            #[must_use]
            pub fn filled(mut self) -> Self {
                $(
                    if self.$field.trim().is_empty() {
                        self.$field = String::from($default);
                    }
                )*
                self
            }
        }
    };
}

language_strings! {
    any_area_text => "Any Area",
    any_area_selected_text => "Any",
    not_available_text => "Not Available",
    no_times_available => "No time slots available.",
    no_times_for_area => "This area is not available at this time. Please choose another area.",
    no_areas_available => "No specific areas available for this date/time.",
    no_addons_available => "No addons available for this selection.",
    no_addons_for_guest_count => "No addons currently available for the selected number of guests.",
    no_addons_available_time => "No addons available for this time.",
    available_addons_title => "Available Addons:",
    loading_times => "Loading times...",
    error_loading_times => "Could not load times. Please try again.",
    prompt_selection => "Please select date and guests for times.",
    error_date_in_past => "The selected date is in the past.",
    error_invalid_input => "Please choose a valid date and number of guests.",
    no_area_available_for_selection => "No area is available for this selection.",
    error_covers_missing => "Please select the number of guests.",
    error_generic => "An error occurred. Please try again.",
    /// `{0}` is replaced by the area name.
    no_availability_for_area_in_session => "No availability for {0} for this session",
}

impl LanguageStrings {
    /// Renders the per-area "unavailable this session" marker.
    #[must_use]
    pub fn area_unavailable_notice(&self, area_name: &str) -> String {
        self.no_availability_for_area_in_session
            .replace("{0}", area_name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Number(i64),
    Text(String),
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FlagRepr::deserialize(deserializer)? {
        FlagRepr::Bool(b) => b,
        FlagRepr::Number(n) => n != 0,
        FlagRepr::Text(s) => {
            let s: String = strip_quotes(&s).to_ascii_lowercase();
            s == "true" || s == "1"
        }
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(u32),
    Text(String),
}

fn de_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match CountRepr::deserialize(deserializer)? {
        CountRepr::Number(n) => Ok(n),
        CountRepr::Text(s) => strip_quotes(&s)
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid count '{s}': {e}"))),
    }
}

fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = String::deserialize(deserializer)?;
    Ok(strip_quotes(&raw).to_string())
}

fn de_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = String::deserialize(deserializer)?;
    let symbol: String = strip_html_entities(strip_quotes(&raw));
    if symbol.trim().is_empty() {
        Ok(String::from("$"))
    } else {
        Ok(symbol.trim().to_string())
    }
}

fn strip_quotes(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// Removes `&name;` / `&#123;` sequences, keeping everything else.
fn strip_html_entities(text: &str) -> String {
    let mut out: String = String::with_capacity(text.len());
    let mut rest: &str = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail: &str = &rest[start..];
        match tail.find(';') {
            Some(end)
                if end > 1
                    && tail[1..end]
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '#') =>
            {
                rest = &tail[end + 1..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
