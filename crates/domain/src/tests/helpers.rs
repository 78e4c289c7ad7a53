// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AddonDef, AddonUid, Area, AreaUid, Availability, BookingConfig, DecimalTime, PricePer, Shift,
    ShiftUid, UsagePolicy,
};

pub fn times(values: &[f64]) -> Vec<DecimalTime> {
    values.iter().copied().map(DecimalTime::new).collect()
}

pub fn create_test_addon(uid: &str, price_minor: i64, per: PricePer) -> AddonDef {
    AddonDef {
        uid: AddonUid::new(uid),
        name: format!("Addon {uid}"),
        price_minor,
        per,
        min: None,
        max: None,
        desc: String::new(),
    }
}

pub fn create_test_shift(uid: &str, values: &[f64], usage: Option<UsagePolicy>) -> Shift {
    Shift {
        uid: ShiftUid::new(uid),
        name: uid.to_string(),
        times: times(values),
        usage,
        addons: vec![
            create_test_addon("a", 500, PricePer::Guest),
            create_test_addon("b", 1000, PricePer::Party),
        ],
        message: None,
    }
}

pub fn create_test_area(uid: &str, values: &[f64]) -> Area {
    Area {
        uid: AreaUid::new(uid),
        name: uid.to_string(),
        times: times(values),
    }
}

pub fn create_test_availability() -> Availability {
    Availability {
        shifts: vec![create_test_shift(
            "dinner",
            &[18.0, 18.5],
            Some(UsagePolicy::Quantities),
        )],
        areas: vec![create_test_area("patio", &[18.0])],
        message: None,
    }
}

pub fn create_test_config() -> BookingConfig {
    BookingConfig {
        area_selection: true,
        area_any: true,
        ..BookingConfig::default()
    }
}
