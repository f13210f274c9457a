use crate::day::{DAYS, Day};
use crate::restaurant::{Restaurant, RestaurantName};
use crate::schedule::parser::parse;
use crate::schedule::{TimeRange, WeeklySchedule};
use crate::time::ClockTime;
use proptest::prelude::*;
use std::sync::Arc;

pub fn id(s: &str) -> RestaurantName {
    Arc::from(s)
}

pub fn t(hour: u8, minute: u8) -> ClockTime {
    ClockTime { hour, minute }
}

pub fn range(open: (u8, u8), close: (u8, u8)) -> TimeRange {
    TimeRange::new(t(open.0, open.1), t(close.0, close.1))
}

pub fn schedule(hours: &str) -> WeeklySchedule {
    parse(&id("test"), hours).unwrap()
}

pub fn add_restaurant(restaurants: &mut Vec<Restaurant>, name: &str, hours: &str) {
    restaurants.push(Restaurant {
        name: id(name),
        schedule: parse(&id(name), hours).unwrap(),
    });
}

pub const SUDACHI: &str =
    "Mon-Wed, Sat 5 pm - 12:30 am  / Thu-Fri 5 pm - 1:30 am  / Sun 3 pm - 11:30 pm";

pub fn arb_day() -> impl Strategy<Value = Day> {
    (0..7usize).prop_map(|i| DAYS[i])
}

pub fn arb_time() -> impl Strategy<Value = ClockTime> {
    (0..24u8, 0..60u8).prop_map(|(hour, minute)| ClockTime { hour, minute })
}

/// Ranges the hours grammar can express for a shift: opening after 05:00, closing at most
/// 05:00 the next morning.
pub fn arb_range() -> impl Strategy<Value = TimeRange> {
    (arb_time(), arb_time())
        .prop_filter("opens after closing hour", |(open, _)| open.hour > 5)
        .prop_map(|(open, close)| TimeRange::new(open, close))
}

pub fn arb_schedule() -> impl Strategy<Value = WeeklySchedule> {
    prop::collection::vec(prop::option::of(arb_range()), 7)
        .prop_filter("open at least one day", |days| days.iter().any(Option::is_some))
        .prop_map(|days| {
            let mut schedule = WeeklySchedule::default();
            for (day, slot) in DAYS.iter().zip(days) {
                if let Some(range) = slot {
                    schedule.set(*day, range);
                }
            }
            schedule
        })
}
