use crate::day::Day;
use crate::restaurant::{Restaurant, RestaurantName};
use crate::schedule::{TimeRange, WeeklySchedule};
use crate::time::{CLOSING_HOUR, ClockTime};
use std::cmp::Ordering;

impl TimeRange {
    /// Inclusive of `open`, exclusive of `close`, on the shift timeline.
    pub fn contains(&self, time: ClockTime) -> bool {
        ClockTime::shift_compare(self.open, time) != Ordering::Greater
            && ClockTime::shift_compare(time, self.close) == Ordering::Less
    }
}

/// The day whose shift a query belongs to: times before `CLOSING_HOUR` are the tail of the
/// previous day's shift.
pub fn shift_day(day: Day, time: ClockTime) -> Day {
    if time.hour < CLOSING_HOUR {
        day.previous()
    } else {
        day
    }
}

impl WeeklySchedule {
    pub fn is_open_at(&self, day: Day, time: ClockTime) -> bool {
        self.get(shift_day(day, time))
            .map_or(false, |range| range.contains(time))
    }
}

/// Names of the restaurants open at `day`/`time`, in catalog order.
pub fn find_open(restaurants: &[Restaurant], day: Day, time: ClockTime) -> Vec<RestaurantName> {
    restaurants
        .iter()
        .filter(|r| r.schedule.is_open_at(day, time))
        .map(|r| r.name.clone())
        .collect()
}
