// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TODAY, create_loaded_controller, create_test_config, create_test_payload, payload,
};
use crate::{AvailabilityStatus, Controller, FetchRequest, Update};
use proptest::prelude::*;
use tablehold_domain::{AddonUid, DecimalTime, ShiftUid};

proptest! {
    #[test]
    fn prop_only_latest_fetch_is_applied(
        covers in prop::collection::vec(1u32..=10, 1..6),
        reverse in any::<bool>(),
    ) {
        let mut controller: Controller = Controller::new(create_test_config(), TODAY);
        let mut requests: Vec<FetchRequest> = Vec::new();
        for n in &covers {
            if let Some(request) = controller.set_covers(*n).unwrap().fetch {
                requests.push(request);
            }
        }
        let latest: FetchRequest = *requests.last().unwrap();
        if reverse {
            requests.reverse();
        }

        let mut stale: usize = 0;
        for request in &requests {
            let update: Update = controller
                .complete_fetch(request.ticket, payload(create_test_payload(None)))
                .unwrap();
            if update.stale_response.is_some() {
                stale += 1;
            }
        }

        prop_assert_eq!(stale, requests.len() - 1);
        prop_assert_eq!(controller.state().selection.covers, latest.covers);
        let is_loaded: bool = matches!(
            controller.state().availability,
            AvailabilityStatus::Loaded { .. }
        );
        prop_assert!(is_loaded);
    }

    #[test]
    fn prop_view_progress_matches_state(
        covers in 1u32..=6,
        increments in prop::collection::vec(any::<bool>(), 0..10),
    ) {
        let mut controller: Controller =
            create_loaded_controller(create_test_config(), covers, Some(2));
        controller
            .select_time(ShiftUid::new("1"), DecimalTime::new(18.0))
            .unwrap();

        for wine in increments {
            let addon: AddonUid = AddonUid::new(if wine { "7" } else { "8" });
            controller.increment_addon(addon).unwrap();
            let total: u32 = controller.state().selection.addons.quantity_total();
            prop_assert!(total <= covers);
            prop_assert_eq!(controller.view().progress, controller.state().progress());
            prop_assert_eq!(controller.view().progress.is_ready(), total == covers);
        }
    }
}
