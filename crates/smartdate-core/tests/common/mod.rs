#![allow(dead_code)]

use jiff::{civil::date, tz::TimeZone, Zoned};
use smartdate_core::{EngineBuilder, EngineContext, FixedClock};

/// Builds a UTC instant from calendar fields.
pub fn utc(y: i16, mo: i8, d: i8, h: i8, mi: i8, s: i8) -> Zoned {
    date(y, mo, d)
        .at(h, mi, s, 0)
        .to_zoned(TimeZone::UTC)
        .expect("Invalid test date")
}

/// The instant every integration test treats as now: 2015-01-13 13:13:13 UTC.
pub fn frozen_now() -> Zoned {
    utc(2015, 1, 13, 13, 13, 13)
}

/// Helper function to create an engine frozen at [`frozen_now`] in UTC
pub fn frozen_engine() -> EngineContext {
    EngineBuilder::new()
        .with_clock(FixedClock(frozen_now().timestamp()))
        .with_time_zone(TimeZone::UTC)
        .build()
        .expect("Failed to create engine")
}
