// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TODAY, create_loaded_controller, create_test_config, create_test_payload, payload,
};
use crate::{AddonPanelView, AreaPickerView, BookingView, Controller, FetchRequest, TimesView};
use tablehold_domain::{
    AddonUid, AreaChoice, AreaUid, BookingConfig, DecimalTime, Progress, RawAvailability,
    ShiftUid, SlotState,
};

#[test]
fn test_fresh_session_prompts_for_input() {
    let view: BookingView = Controller::new(create_test_config(), TODAY).view();

    assert_eq!(
        view.times,
        TimesView::Prompt {
            message: String::from("Please select date and guests for times."),
        }
    );
    assert_eq!(view.progress, Progress::Blocked);
    assert!(view.areas.is_none());
    assert_eq!(view.summary.covers, None);
    assert_eq!(view.summary.addons, "-");
}

#[test]
fn test_pending_fetch_shows_loading() {
    let mut controller: Controller = Controller::new(create_test_config(), TODAY);

    let view: BookingView = controller.set_covers(2).unwrap().view;

    assert!(matches!(view.times, TimesView::Loading { .. }));
    assert_eq!(view.covers, 2);
}

#[test]
fn test_loaded_view_filters_by_chosen_area() {
    let controller: Controller = create_loaded_controller(create_test_config(), 2, None);
    let view: BookingView = controller.view();

    let TimesView::Slots {
        shifts,
        notice,
        selected,
    } = view.times
    else {
        panic!("expected time slots");
    };
    assert!(notice.is_none());
    assert!(selected.is_none());
    assert_eq!(shifts.len(), 1);
    let states: Vec<SlotState> = shifts[0].slots.iter().map(|slot| slot.state).collect();
    assert_eq!(states, vec![SlotState::Available, SlotState::Inactive]);
    assert_eq!(shifts[0].slots[1].label, "6:30 PM");
    assert_eq!(view.daily_message.as_deref(), Some("Welcome"));
}

#[test]
fn test_area_picker_lists_any_first() {
    let controller: Controller = create_loaded_controller(create_test_config(), 2, None);

    let picker: AreaPickerView = controller.view().areas.unwrap();

    let names: Vec<&str> = picker.options.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["Any Area", "Patio", "Terrace"]);
    assert!(picker.options.iter().all(|o| o.available));
    assert_eq!(
        picker.selected,
        Some(AreaChoice::Specific(AreaUid::new("10")))
    );
    assert!(picker.error.is_none());
}

#[test]
fn test_unavailable_area_is_listed_with_notice() {
    let mut controller: Controller = Controller::new(create_test_config(), TODAY);
    let request: FetchRequest = controller.set_covers(2).unwrap().fetch.unwrap();
    let mut raw: RawAvailability = create_test_payload(None);
    if let Some(shifts) = raw.shifts.as_mut() {
        shifts[0].times = Some(vec![18.0]);
    }
    controller.complete_fetch(request.ticket, payload(raw)).unwrap();

    let picker: AreaPickerView = controller.view().areas.unwrap();

    assert!(!picker.options[2].available);
    assert_eq!(
        picker.options[2].notice.as_deref(),
        Some("No availability for Terrace for this session")
    );
}

#[test]
fn test_no_selectable_area_shows_notice() {
    let config: BookingConfig = BookingConfig {
        area_any: false,
        ..create_test_config()
    };
    let mut controller: Controller = Controller::new(config, TODAY);
    let request: FetchRequest = controller.set_covers(2).unwrap().fetch.unwrap();
    let mut raw: RawAvailability = create_test_payload(None);
    if let Some(shifts) = raw.shifts.as_mut() {
        shifts[0].times = Some(vec![20.0]);
    }
    controller.complete_fetch(request.ticket, payload(raw)).unwrap();

    let view: BookingView = controller.view();

    assert!(controller.state().selection.area.is_none());
    assert_eq!(
        view.times,
        TimesView::Slots {
            shifts: Vec::new(),
            notice: Some(String::from("No area is available for this selection.")),
            selected: None,
        }
    );
    assert!(view.areas.unwrap().error.is_some());
}

#[test]
fn test_summary_reflects_selection() {
    let mut controller: Controller = create_loaded_controller(create_test_config(), 3, Some(2));
    controller
        .select_time(ShiftUid::new("1"), DecimalTime::new(18.0))
        .unwrap();
    controller.increment_addon(AddonUid::new("7")).unwrap();
    controller.increment_addon(AddonUid::new("7")).unwrap();
    controller.increment_addon(AddonUid::new("8")).unwrap();

    let view: BookingView = controller.view();

    assert_eq!(view.summary.date, "2026-10-19");
    assert_eq!(view.summary.covers, Some(3));
    assert_eq!(view.summary.area.as_deref(), Some("Patio"));
    assert_eq!(view.summary.time.as_deref(), Some("6:00 PM"));
    assert_eq!(view.summary.shift.as_deref(), Some("Dinner"));
    assert_eq!(
        view.summary.addons,
        "Wine x2 ($10.00), Cake x1 ($10.00 - Per Party) --- Total Addons: $20.00"
    );
    assert_eq!(view.summary.addons_total_minor, 2000);
    assert!(view.can_proceed);
}

#[test]
fn test_summary_names_any_area() {
    let mut controller: Controller = create_loaded_controller(create_test_config(), 2, None);
    controller.select_area(AreaChoice::Any).unwrap();

    assert_eq!(controller.view().summary.area.as_deref(), Some("Any"));
}

#[test]
fn test_addon_panel_reports_no_eligible_addons() {
    let mut controller: Controller = Controller::new(create_test_config(), TODAY);
    let request: FetchRequest = controller.set_covers(2).unwrap().fetch.unwrap();
    let mut raw: RawAvailability = create_test_payload(Some(2));
    if let Some(shifts) = raw.shifts.as_mut()
        && let Some(addons) = shifts[0].addons.as_mut()
    {
        for addon in addons.iter_mut() {
            addon.min = Some(5);
        }
    }
    controller.complete_fetch(request.ticket, payload(raw)).unwrap();
    controller
        .select_time(ShiftUid::new("1"), DecimalTime::new(18.0))
        .unwrap();

    let view: BookingView = controller.view();
    let panel: AddonPanelView = view.addons.unwrap();

    assert!(panel.controls.is_empty());
    assert_eq!(
        panel.empty_message.as_deref(),
        Some("No addons currently available for the selected number of guests.")
    );
    assert_eq!(view.progress, Progress::Ready);
}

#[test]
fn test_view_serializes_with_tagged_times() {
    let view: BookingView = Controller::new(create_test_config(), TODAY).view();

    let json: serde_json::Value = serde_json::to_value(&view).unwrap();

    assert_eq!(json["times"]["state"], "prompt");
    assert_eq!(json["progress"], "blocked");
}
