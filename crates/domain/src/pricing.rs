// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Addon costs, the guest-facing addon summary, and the wire encoding.
//!
//! All arithmetic is done in minor units to avoid float drift.

use crate::addons::SelectedAddon;
use crate::types::{AddonDef, AddonUid, PricePer, UsagePolicy};
use serde::{Deserialize, Serialize};

/// Computes the effective cost of one selected addon in minor units.
///
/// * Usage 2 charges per quantity for per-guest addons, and once for
///   per-party addons.
/// * Every other bucket charges per guest when `per` is `Guest` and the
///   guest count is positive, and once otherwise.
#[must_use]
pub fn addon_cost_minor(
    addon: &AddonDef,
    policy: UsagePolicy,
    quantity: u32,
    covers: u32,
) -> i64 {
    match (policy, addon.per) {
        (_, PricePer::Party) => addon.price_minor,
        (UsagePolicy::Quantities, PricePer::Guest) => {
            addon.price_minor.saturating_mul(i64::from(quantity))
        }
        (_, PricePer::Guest) if covers > 0 => addon.price_minor.saturating_mul(i64::from(covers)),
        (_, PricePer::Guest) => addon.price_minor,
    }
}

/// Formats minor units as a currency amount, e.g. `$12.50`.
#[must_use]
pub fn format_minor(minor: i64, symbol: &str) -> String {
    let sign: &str = if minor < 0 { "-" } else { "" };
    let abs: u64 = minor.unsigned_abs();
    format!("{sign}{symbol}{}.{:02}", abs / 100, abs % 100)
}

/// One priced line of the addon summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub uid: AddonUid,
    pub name: String,
    pub policy: UsagePolicy,
    pub per: PricePer,
    pub quantity: u32,
    /// The addon's base price.
    pub unit_minor: i64,
    /// The effective cost of the line.
    pub cost_minor: i64,
}

impl PriceLine {
    fn display(&self, symbol: &str) -> String {
        match (self.policy, self.per) {
            (UsagePolicy::Quantities, PricePer::Party) => format!(
                "{} x{} ({} - Per Party)",
                self.name,
                self.quantity,
                format_minor(self.unit_minor, symbol)
            ),
            (UsagePolicy::Quantities, PricePer::Guest) => format!(
                "{} x{} ({})",
                self.name,
                self.quantity,
                format_minor(self.cost_minor, symbol)
            ),
            _ => format!("{} ({})", self.name, format_minor(self.cost_minor, symbol)),
        }
    }

    fn wire_quantity(&self) -> u32 {
        if self.policy == UsagePolicy::Quantities {
            self.quantity
        } else {
            1
        }
    }
}

/// The priced addon selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonSummary {
    pub lines: Vec<PriceLine>,
    pub total_minor: i64,
}

impl AddonSummary {
    /// Prices the selected addons for a party of `covers`.
    #[must_use]
    pub fn from_selected(selected: &[SelectedAddon<'_>], covers: u32) -> Self {
        let lines: Vec<PriceLine> = selected
            .iter()
            .filter(|s| s.policy != UsagePolicy::Quantities || s.quantity > 0)
            .map(|s| PriceLine {
                uid: s.addon.uid.clone(),
                name: s.addon.name.clone(),
                policy: s.policy,
                per: s.addon.per,
                quantity: s.quantity,
                unit_minor: s.addon.price_minor,
                cost_minor: addon_cost_minor(s.addon, s.policy, s.quantity, covers),
            })
            .collect();
        let total_minor: i64 = lines.iter().map(|line| line.cost_minor).sum();
        Self { lines, total_minor }
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The guest-facing summary, or `"-"` when nothing is selected.
    #[must_use]
    pub fn display(&self, symbol: &str) -> String {
        if self.lines.is_empty() {
            return String::from("-");
        }
        let items: Vec<String> = self.lines.iter().map(|line| line.display(symbol)).collect();
        format!(
            "{} --- Total Addons: {}",
            items.join(", "),
            format_minor(self.total_minor, symbol)
        )
    }

    /// The `uid:quantity` list submitted with a hold.
    #[must_use]
    pub fn api_string(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}:{}", line.uid, line.wire_quantity()))
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// Encodes selected addons as the comma-separated `uid:quantity` list.
///
/// Quantity is always `1` outside usage 2; usage-2 lines with zero quantity
/// are omitted.
#[must_use]
pub fn encode_addons(selected: &[SelectedAddon<'_>]) -> String {
    AddonSummary::from_selected(selected, 0).api_string()
}
