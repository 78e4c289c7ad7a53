// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_loaded_controller, create_test_config};
use crate::{AddonPanelView, Controller, CoreError, Update};
use tablehold_domain::{
    AddonSelection, AddonUid, BookingConfig, DecimalTime, DomainError, Progress, QuantityOutcome,
    ShiftUid, UsagePolicy,
};

fn wine() -> AddonUid {
    AddonUid::new("7")
}

fn cake() -> AddonUid {
    AddonUid::new("8")
}

fn controller_with_time(covers: u32, usage: Option<i64>) -> Controller {
    let mut controller: Controller = create_loaded_controller(create_test_config(), covers, usage);
    controller
        .select_time(ShiftUid::new("1"), DecimalTime::new(18.0))
        .unwrap();
    controller
}

#[test]
fn test_quantities_reach_ready_only_at_party_size() {
    let mut controller: Controller = controller_with_time(4, Some(2));
    assert_eq!(controller.view().progress, Progress::Blocked);

    controller.increment_addon(wine()).unwrap();
    controller.increment_addon(wine()).unwrap();
    controller.increment_addon(cake()).unwrap();
    assert_eq!(controller.view().progress, Progress::Blocked);

    let update: Update = controller.increment_addon(cake()).unwrap();

    assert_eq!(update.view.progress, Progress::Ready);
    assert!(update.view.can_proceed);
    let panel: AddonPanelView = update.view.addons.unwrap();
    assert_eq!(panel.total_quantity, 4);
    assert!(panel.controls.iter().all(|control| !control.can_increment));
}

#[test]
fn test_increment_at_capacity_is_rejected() {
    let mut controller: Controller = controller_with_time(1, Some(2));
    controller.increment_addon(wine()).unwrap();

    let update: Update = controller.increment_addon(cake()).unwrap();

    assert_eq!(update.addon_rejected, Some(QuantityOutcome::RejectedAtCapacity));
    assert_eq!(controller.state().selection.addons.quantity_of(&cake()), 0);
    assert_eq!(controller.state().selection.addons.quantity_total(), 1);
}

#[test]
fn test_decrement_at_zero_is_rejected() {
    let mut controller: Controller = controller_with_time(2, Some(2));

    let update: Update = controller.decrement_addon(wine()).unwrap();

    assert_eq!(update.addon_rejected, Some(QuantityOutcome::RejectedAtZero));
}

#[test]
fn test_single_choice_requires_one_addon() {
    let mut controller: Controller = controller_with_time(2, Some(1));
    assert_eq!(controller.view().progress, Progress::Blocked);

    controller.toggle_single_addon(cake()).unwrap();
    assert_eq!(controller.view().progress, Progress::Ready);

    controller.toggle_single_addon(wine()).unwrap();
    assert_eq!(controller.state().selection.addons.usage1(), Some(&wine()));
}

#[test]
fn test_multi_choice_never_blocks() {
    let mut controller: Controller = controller_with_time(2, Some(3));
    assert_eq!(controller.view().progress, Progress::Ready);

    controller.toggle_multi_addon(wine()).unwrap();
    controller.toggle_multi_addon(cake()).unwrap();
    controller.toggle_multi_addon(wine()).unwrap();

    assert_eq!(controller.state().selection.addons.usage3(), &[cake()]);
    assert_eq!(controller.view().progress, Progress::Ready);
}

#[test]
fn test_addon_command_with_wrong_policy_is_rejected() {
    let mut controller: Controller = controller_with_time(2, Some(3));

    let result: Result<Update, CoreError> = controller.increment_addon(wine());

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::PolicyMismatch {
            required: UsagePolicy::Quantities,
            active: Some(UsagePolicy::MultiChoice),
        }))
    );
}

#[test]
fn test_addon_command_without_time_is_rejected() {
    let mut controller: Controller = create_loaded_controller(create_test_config(), 2, Some(3));

    let result: Result<Update, CoreError> = controller.toggle_multi_addon(wine());

    assert_eq!(result, Err(CoreError::NoActiveShift));
}

#[test]
fn test_unknown_addon_is_rejected() {
    let mut controller: Controller = controller_with_time(2, Some(3));

    let result: Result<Update, CoreError> = controller.toggle_multi_addon(AddonUid::new("99"));

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::UnknownAddon(
            AddonUid::new("99")
        )))
    );
}

#[test]
fn test_addons_survive_time_change_within_shift() {
    let config: BookingConfig = BookingConfig {
        area_any: false,
        ..create_test_config()
    };
    let mut controller: Controller = create_loaded_controller(config, 2, Some(3));
    controller
        .select_time(ShiftUid::new("1"), DecimalTime::new(18.0))
        .unwrap();
    controller.toggle_multi_addon(cake()).unwrap();

    controller
        .select_time(ShiftUid::new("1"), DecimalTime::new(18.5))
        .unwrap();

    assert_eq!(controller.state().selection.addons.usage3(), &[cake()]);
}

#[test]
fn test_no_interaction_policy_has_no_panel() {
    let controller: Controller = controller_with_time(2, Some(0));

    assert!(controller.view().addons.is_none());
    assert_eq!(controller.view().progress, Progress::Ready);
    assert_eq!(controller.state().selection.addons, AddonSelection::Empty);
}
