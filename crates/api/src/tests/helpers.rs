// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingClient, FixtureBackend};
use serde_json::json;
use std::sync::Arc;
use tablehold::Controller;
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

pub fn create_test_payload(message: &str) -> RawAvailability {
    serde_json::from_value(json!({
        "message": message,
        "shifts": [{
            "uid": 1,
            "name": "Dinner",
            "times": [18.0, 18.5],
            "usage": 2,
            "addons": [
                {"uid": 7, "name": "Wine", "price": 500, "per": "Guest"}
            ]
        }],
        "areas": [
            {"uid": 10, "name": "Patio", "times": [18.0]},
            {"uid": 11, "name": "Terrace", "times": [18.5]}
        ]
    }))
    .unwrap()
}

pub fn create_test_client(backend: FixtureBackend) -> BookingClient<FixtureBackend> {
    BookingClient::new(
        Arc::new(backend),
        Controller::new(create_test_config(), TODAY),
        "testnz",
        "en",
    )
}
