// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Addon eligibility and the per-policy selection rules.
//!
//! The selection is a single enum so only the bucket matching the active
//! shift's policy can ever hold data. Addons are always referenced by uid and
//! resolved against the engine's own eligible list.

use crate::error::DomainError;
use crate::types::{AddonDef, AddonUid, PricePer, Shift, UsagePolicy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A usage-2 line: an addon and its chosen quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonQuantity {
    pub uid: AddonUid,
    pub quantity: u32,
}

/// The guest's addon choices for the active shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "value", rename_all = "snake_case")]
pub enum AddonSelection {
    /// No shift is active, or the shift has no addon interaction.
    #[default]
    Empty,
    /// Usage 1: at most one chosen addon.
    Single(Option<AddonUid>),
    /// Usage 2: quantities; entries with quantity zero are removed.
    Quantities(Vec<AddonQuantity>),
    /// Usage 3: a set of chosen addons, in selection order.
    Multi(Vec<AddonUid>),
}

impl AddonSelection {
    /// Returns the empty selection matching `policy`.
    #[must_use]
    pub const fn for_policy(policy: Option<UsagePolicy>) -> Self {
        match policy {
            Some(UsagePolicy::SingleChoice) => Self::Single(None),
            Some(UsagePolicy::Quantities) => Self::Quantities(Vec::new()),
            Some(UsagePolicy::MultiChoice) => Self::Multi(Vec::new()),
            Some(UsagePolicy::NoInteraction) | None => Self::Empty,
        }
    }

    /// The usage-1 choice, if any.
    #[must_use]
    pub const fn usage1(&self) -> Option<&AddonUid> {
        match self {
            Self::Single(choice) => choice.as_ref(),
            _ => None,
        }
    }

    /// The usage-2 quantities.
    #[must_use]
    pub fn usage2(&self) -> &[AddonQuantity] {
        match self {
            Self::Quantities(lines) => lines,
            _ => &[],
        }
    }

    /// The usage-3 choices.
    #[must_use]
    pub fn usage3(&self) -> &[AddonUid] {
        match self {
            Self::Multi(uids) => uids,
            _ => &[],
        }
    }

    /// Sum of usage-2 quantities.
    #[must_use]
    pub fn quantity_total(&self) -> u32 {
        self.usage2().iter().map(|line| line.quantity).sum()
    }

    /// The usage-2 quantity of one addon.
    #[must_use]
    pub fn quantity_of(&self, uid: &AddonUid) -> u32 {
        self.usage2()
            .iter()
            .find(|line| &line.uid == uid)
            .map_or(0, |line| line.quantity)
    }

    /// Returns whether nothing is chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty | Self::Single(None) => true,
            Self::Single(Some(_)) => false,
            Self::Quantities(lines) => lines.is_empty(),
            Self::Multi(uids) => uids.is_empty(),
        }
    }
}

/// The result of a usage-2 quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityOutcome {
    /// The change was applied; carries the addon's new quantity.
    Applied(u32),
    /// Incrementing would push the total above the guest count.
    RejectedAtCapacity,
    /// Decrementing would go below zero.
    RejectedAtZero,
}

/// The interactive state of one eligible addon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonControl {
    pub uid: AddonUid,
    pub name: String,
    pub desc: String,
    pub price_minor: i64,
    pub per: PricePer,
    /// Whether the addon is chosen (usage 1 and 3).
    pub selected: bool,
    /// The chosen quantity (usage 2).
    pub quantity: u32,
    /// Whether the plus button is enabled (usage 2).
    pub can_increment: bool,
    /// Whether the minus button is enabled (usage 2).
    pub can_decrement: bool,
}

/// A chosen addon resolved against the eligible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedAddon<'a> {
    pub addon: &'a AddonDef,
    /// The bucket the addon was chosen from.
    pub policy: UsagePolicy,
    /// Always 1 outside usage 2.
    pub quantity: u32,
}

/// Applies addon rules for one shift and guest count.
#[derive(Debug, Clone)]
pub struct AddonEngine<'a> {
    policy: Option<UsagePolicy>,
    covers: u32,
    eligible: Vec<&'a AddonDef>,
}

impl<'a> AddonEngine<'a> {
    /// Builds the engine for `shift`, keeping addons whose guest-count bounds
    /// contain `covers`.
    #[must_use]
    pub fn for_shift(shift: &'a Shift, covers: u32) -> Self {
        let eligible: Vec<&'a AddonDef> = shift
            .addons
            .iter()
            .filter(|addon| addon.is_eligible_for(covers))
            .collect();
        Self {
            policy: shift.usage,
            covers,
            eligible,
        }
    }

    /// The active usage policy.
    #[must_use]
    pub const fn policy(&self) -> Option<UsagePolicy> {
        self.policy
    }

    /// The guest count the engine was built for.
    #[must_use]
    pub const fn covers(&self) -> u32 {
        self.covers
    }

    /// The addons eligible for the guest count, in catalog order.
    #[must_use]
    pub fn eligible(&self) -> &[&'a AddonDef] {
        &self.eligible
    }

    /// Returns whether usage 1 is presented as a single optional toggle.
    #[must_use]
    pub fn is_single_toggle(&self) -> bool {
        self.policy == Some(UsagePolicy::SingleChoice) && self.eligible.len() == 1
    }

    fn lookup(&self, uid: &AddonUid) -> Result<&'a AddonDef, DomainError> {
        self.eligible
            .iter()
            .copied()
            .find(|addon| &addon.uid == uid)
            .ok_or_else(|| DomainError::UnknownAddon(uid.clone()))
    }

    fn require(&self, required: UsagePolicy) -> Result<(), DomainError> {
        if self.policy == Some(required) {
            Ok(())
        } else {
            Err(DomainError::PolicyMismatch {
                required,
                active: self.policy,
            })
        }
    }

    /// Resets `selection` to this engine's bucket if it holds another one.
    fn align(&self, selection: &mut AddonSelection) {
        let expected: AddonSelection = AddonSelection::for_policy(self.policy);
        if std::mem::discriminant(selection) != std::mem::discriminant(&expected) {
            *selection = expected;
        }
    }

    /// Usage 1: chooses `uid`.
    ///
    /// With a single eligible addon the choice toggles; with several, the
    /// choice replaces any prior one.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PolicyMismatch`] outside usage 1, or
    /// [`DomainError::UnknownAddon`] if `uid` is not eligible.
    pub fn toggle_single(
        &self,
        selection: &mut AddonSelection,
        uid: &AddonUid,
    ) -> Result<(), DomainError> {
        self.require(UsagePolicy::SingleChoice)?;
        let addon: &AddonDef = self.lookup(uid)?;
        self.align(selection);

        let already: bool = selection.usage1() == Some(&addon.uid);
        *selection = if already && self.is_single_toggle() {
            AddonSelection::Single(None)
        } else {
            AddonSelection::Single(Some(addon.uid.clone()))
        };
        debug!(addon = %uid, selection = ?selection, "Applied usage-1 toggle");
        Ok(())
    }

    /// Usage 2: adds one to `uid`'s quantity.
    ///
    /// Rejected when the guest count is zero or the total would exceed it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PolicyMismatch`] outside usage 2, or
    /// [`DomainError::UnknownAddon`] if `uid` is not eligible.
    pub fn increment(
        &self,
        selection: &mut AddonSelection,
        uid: &AddonUid,
    ) -> Result<QuantityOutcome, DomainError> {
        self.require(UsagePolicy::Quantities)?;
        let addon: &AddonDef = self.lookup(uid)?;
        self.align(selection);

        if self.covers == 0 || selection.quantity_total() >= self.covers {
            debug!(addon = %uid, covers = self.covers, "Rejected usage-2 increment");
            return Ok(QuantityOutcome::RejectedAtCapacity);
        }

        let quantity: u32 = selection.quantity_of(&addon.uid) + 1;
        set_quantity(selection, &addon.uid, quantity);
        Ok(QuantityOutcome::Applied(quantity))
    }

    /// Usage 2: removes one from `uid`'s quantity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PolicyMismatch`] outside usage 2, or
    /// [`DomainError::UnknownAddon`] if `uid` is not eligible.
    pub fn decrement(
        &self,
        selection: &mut AddonSelection,
        uid: &AddonUid,
    ) -> Result<QuantityOutcome, DomainError> {
        self.require(UsagePolicy::Quantities)?;
        let addon: &AddonDef = self.lookup(uid)?;
        self.align(selection);

        let current: u32 = selection.quantity_of(&addon.uid);
        if current == 0 {
            return Ok(QuantityOutcome::RejectedAtZero);
        }
        set_quantity(selection, &addon.uid, current - 1);
        Ok(QuantityOutcome::Applied(current - 1))
    }

    /// Usage 3: flips whether `uid` is chosen and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PolicyMismatch`] outside usage 3, or
    /// [`DomainError::UnknownAddon`] if `uid` is not eligible.
    pub fn toggle_multi(
        &self,
        selection: &mut AddonSelection,
        uid: &AddonUid,
    ) -> Result<bool, DomainError> {
        self.require(UsagePolicy::MultiChoice)?;
        let addon: &AddonDef = self.lookup(uid)?;
        self.align(selection);

        if let AddonSelection::Multi(uids) = selection {
            if let Some(pos) = uids.iter().position(|u| u == &addon.uid) {
                uids.remove(pos);
                return Ok(false);
            }
            uids.push(addon.uid.clone());
        }
        Ok(true)
    }

    /// The completeness predicate for the active policy.
    ///
    /// An empty eligible list is always complete.
    #[must_use]
    pub fn is_complete(&self, selection: &AddonSelection) -> bool {
        if self.eligible.is_empty() {
            return true;
        }
        match self.policy {
            Some(UsagePolicy::SingleChoice) => selection
                .usage1()
                .is_some_and(|uid| !uid.as_str().is_empty()),
            Some(UsagePolicy::Quantities) => {
                self.covers > 0 && selection.quantity_total() == self.covers
            }
            Some(UsagePolicy::NoInteraction | UsagePolicy::MultiChoice) | None => true,
        }
    }

    /// The per-addon interactive state, recomputed from `selection`.
    #[must_use]
    pub fn controls(&self, selection: &AddonSelection) -> Vec<AddonControl> {
        let total: u32 = selection.quantity_total();
        let is_quantities: bool = self.policy == Some(UsagePolicy::Quantities);
        self.eligible
            .iter()
            .map(|addon| {
                let quantity: u32 = selection.quantity_of(&addon.uid);
                AddonControl {
                    uid: addon.uid.clone(),
                    name: addon.name.clone(),
                    desc: addon.desc.clone(),
                    price_minor: addon.price_minor,
                    per: addon.per,
                    selected: selection.usage1() == Some(&addon.uid)
                        || selection.usage3().contains(&addon.uid),
                    quantity,
                    can_increment: is_quantities && self.covers > 0 && total < self.covers,
                    can_decrement: is_quantities && quantity > 0,
                }
            })
            .collect()
    }

    /// Resolves the chosen addons, usage-1 first, then usage-2, then usage-3.
    ///
    /// Choices no longer in the eligible list are skipped.
    #[must_use]
    pub fn selected(&self, selection: &AddonSelection) -> Vec<SelectedAddon<'a>> {
        let mut out: Vec<SelectedAddon<'a>> = Vec::new();
        if let Some(addon) = selection.usage1().and_then(|uid| self.lookup(uid).ok()) {
            out.push(SelectedAddon {
                addon,
                policy: UsagePolicy::SingleChoice,
                quantity: 1,
            });
        }
        for line in selection.usage2() {
            if line.quantity == 0 {
                continue;
            }
            if let Ok(addon) = self.lookup(&line.uid) {
                out.push(SelectedAddon {
                    addon,
                    policy: UsagePolicy::Quantities,
                    quantity: line.quantity,
                });
            }
        }
        for uid in selection.usage3() {
            if let Ok(addon) = self.lookup(uid) {
                out.push(SelectedAddon {
                    addon,
                    policy: UsagePolicy::MultiChoice,
                    quantity: 1,
                });
            }
        }
        out
    }
}

fn set_quantity(selection: &mut AddonSelection, uid: &AddonUid, quantity: u32) {
    if let AddonSelection::Quantities(lines) = selection {
        if let Some(line) = lines.iter_mut().find(|line| &line.uid == uid) {
            line.quantity = quantity;
        } else if quantity > 0 {
            lines.push(AddonQuantity {
                uid: uid.clone(),
                quantity,
            });
        }
        lines.retain(|line| line.quantity > 0);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{DecimalTime, PricePer, ShiftUid};

    fn create_test_addon(uid: &str, min: Option<u32>, max: Option<u32>) -> AddonDef {
        AddonDef {
            uid: AddonUid::new(uid),
            name: uid.to_uppercase(),
            price_minor: 500,
            per: PricePer::Guest,
            min,
            max,
            desc: String::new(),
        }
    }

    fn create_test_shift(usage: UsagePolicy, addons: Vec<AddonDef>) -> Shift {
        Shift {
            uid: ShiftUid::new("dinner"),
            name: String::from("Dinner"),
            times: vec![DecimalTime::new(18.0)],
            usage: Some(usage),
            addons,
            message: None,
        }
    }

    #[test]
    fn test_eligibility_uses_default_bounds() {
        let shift: Shift = create_test_shift(
            UsagePolicy::MultiChoice,
            vec![
                create_test_addon("a", None, None),
                create_test_addon("b", Some(4), None),
                create_test_addon("c", None, Some(2)),
            ],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 3);
        let uids: Vec<&str> = engine.eligible().iter().map(|a| a.uid.as_str()).collect();
        assert_eq!(uids, vec!["a"]);

        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 0);
        assert_eq!(engine.eligible().len(), 0);
    }

    #[test]
    fn test_single_toggle_clears_on_retoggle() {
        let shift: Shift = create_test_shift(
            UsagePolicy::SingleChoice,
            vec![create_test_addon("a", None, None)],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 2);
        let mut selection: AddonSelection = AddonSelection::for_policy(engine.policy());
        let uid: AddonUid = AddonUid::new("a");

        engine.toggle_single(&mut selection, &uid).unwrap();
        assert_eq!(selection.usage1(), Some(&uid));
        assert!(engine.is_complete(&selection));

        engine.toggle_single(&mut selection, &uid).unwrap();
        assert_eq!(selection.usage1(), None);
        assert!(!engine.is_complete(&selection));
    }

    #[test]
    fn test_single_choice_replaces_with_multiple_addons() {
        let shift: Shift = create_test_shift(
            UsagePolicy::SingleChoice,
            vec![
                create_test_addon("a", None, None),
                create_test_addon("b", None, None),
            ],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 2);
        let mut selection: AddonSelection = AddonSelection::default();

        engine.toggle_single(&mut selection, &AddonUid::new("a")).unwrap();
        engine.toggle_single(&mut selection, &AddonUid::new("b")).unwrap();
        assert_eq!(selection.usage1(), Some(&AddonUid::new("b")));
        engine.toggle_single(&mut selection, &AddonUid::new("b")).unwrap();
        assert_eq!(selection.usage1(), Some(&AddonUid::new("b")));
    }

    #[test]
    fn test_quantities_capped_at_covers() {
        let shift: Shift = create_test_shift(
            UsagePolicy::Quantities,
            vec![
                create_test_addon("a", None, None),
                create_test_addon("b", None, None),
            ],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 4);
        let mut selection: AddonSelection = AddonSelection::for_policy(engine.policy());
        let a: AddonUid = AddonUid::new("a");
        let b: AddonUid = AddonUid::new("b");

        for expected in 1..=4 {
            assert_eq!(
                engine.increment(&mut selection, &a).unwrap(),
                QuantityOutcome::Applied(expected)
            );
        }
        assert_eq!(
            engine.increment(&mut selection, &b).unwrap(),
            QuantityOutcome::RejectedAtCapacity
        );
        assert!(engine.is_complete(&selection));

        let controls: Vec<AddonControl> = engine.controls(&selection);
        assert!(controls.iter().all(|c| !c.can_increment));
        assert!(controls[0].can_decrement);
        assert!(!controls[1].can_decrement);

        engine.decrement(&mut selection, &a).unwrap();
        assert!(!engine.is_complete(&selection));
        assert_eq!(
            engine.increment(&mut selection, &b).unwrap(),
            QuantityOutcome::Applied(1)
        );
        assert!(engine.is_complete(&selection));
    }

    #[test]
    fn test_decrement_rejected_at_zero() {
        let shift: Shift = create_test_shift(
            UsagePolicy::Quantities,
            vec![create_test_addon("a", None, None)],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 2);
        let mut selection: AddonSelection = AddonSelection::default();
        assert_eq!(
            engine.decrement(&mut selection, &AddonUid::new("a")).unwrap(),
            QuantityOutcome::RejectedAtZero
        );
        assert_eq!(selection, AddonSelection::Quantities(Vec::new()));
    }

    #[test]
    fn test_multi_toggles_independently() {
        let shift: Shift = create_test_shift(
            UsagePolicy::MultiChoice,
            vec![
                create_test_addon("a", None, None),
                create_test_addon("b", None, None),
            ],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 2);
        let mut selection: AddonSelection = AddonSelection::default();
        assert!(engine.is_complete(&selection));
        assert!(engine.toggle_multi(&mut selection, &AddonUid::new("a")).unwrap());
        assert!(engine.toggle_multi(&mut selection, &AddonUid::new("b")).unwrap());
        assert!(!engine.toggle_multi(&mut selection, &AddonUid::new("a")).unwrap());
        assert_eq!(selection.usage3(), &[AddonUid::new("b")]);
    }

    #[test]
    fn test_policy_mismatch_and_unknown_addon() {
        let shift: Shift = create_test_shift(
            UsagePolicy::MultiChoice,
            vec![create_test_addon("a", None, None)],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 2);
        let mut selection: AddonSelection = AddonSelection::default();

        let result: Result<QuantityOutcome, DomainError> =
            engine.increment(&mut selection, &AddonUid::new("a"));
        assert!(matches!(result, Err(DomainError::PolicyMismatch { .. })));

        let result: Result<bool, DomainError> =
            engine.toggle_multi(&mut selection, &AddonUid::new("zzz"));
        assert_eq!(result, Err(DomainError::UnknownAddon(AddonUid::new("zzz"))));
    }

    #[test]
    fn test_empty_eligible_list_is_complete() {
        let shift: Shift = create_test_shift(
            UsagePolicy::Quantities,
            vec![create_test_addon("a", Some(6), None)],
        );
        let engine: AddonEngine<'_> = AddonEngine::for_shift(&shift, 2);
        assert!(engine.is_complete(&AddonSelection::default()));
    }
}
