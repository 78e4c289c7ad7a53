// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Controller, FetchOutcome, FetchRequest, Update};
use serde_json::json;
use tablehold_domain::{BookingConfig, RawAvailability};
use time::Date;
use time::macros::date;

pub const TODAY: Date = date!(2026 - 10 - 19);

pub fn create_test_config() -> BookingConfig {
    BookingConfig {
        area_selection: true,
        area_any: true,
        ..BookingConfig::default()
    }
}

/// One dinner shift at 18:00 and 18:30 with two addons, a patio open at
/// 18:00 and a terrace open at 18:30.
pub fn create_test_payload(usage: Option<i64>) -> RawAvailability {
    serde_json::from_value(json!({
        "message": "Welcome",
        "shifts": [{
            "uid": 1,
            "name": "Dinner",
            "times": [18.0, 18.5],
            "usage": usage,
            "addons": [
                {"uid": 7, "name": "Wine", "price": 500, "per": "Guest"},
                {"uid": 8, "name": "Cake", "price": 1000, "per": "Party"}
            ]
        }],
        "areas": [
            {"uid": 10, "name": "Patio", "times": [18.0]},
            {"uid": 11, "name": "Terrace", "times": [18.5]}
        ]
    }))
    .unwrap()
}

pub fn payload(raw: RawAvailability) -> FetchOutcome {
    FetchOutcome::Payload { payload: raw }
}

/// Requests `covers` guests and completes the resulting fetch.
pub fn create_loaded_controller(
    config: BookingConfig,
    covers: u32,
    usage: Option<i64>,
) -> Controller {
    let mut controller: Controller = Controller::new(config, TODAY);
    let request: FetchRequest = controller.set_covers(covers).unwrap().fetch.unwrap();
    let update: Update = controller
        .complete_fetch(request.ticket, payload(create_test_payload(usage)))
        .unwrap();
    assert!(update.stale_response.is_none());
    controller
}
