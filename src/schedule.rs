use crate::day::{DAYS, Day};
use crate::time::ClockTime;
use std::fmt;

pub mod matcher;
pub mod parser;

/// Half-open `[open, close)`; `close` before `open` means the range ends the next morning.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TimeRange {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl TimeRange {
    pub fn new(open: ClockTime, close: ClockTime) -> Self {
        TimeRange { open, close }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.open, self.close)
    }
}

/// One optional range per day, indexed Mon..Sun.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WeeklySchedule {
    days: [Option<TimeRange>; 7],
}

impl WeeklySchedule {
    pub fn get(&self, day: Day) -> Option<&TimeRange> {
        self.days[day.index()].as_ref()
    }

    /// Returns the range previously held by `day`.
    pub fn set(&mut self, day: Day, range: TimeRange) -> Option<TimeRange> {
        self.days[day.index()].replace(range)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, Option<&TimeRange>)> {
        DAYS.iter().map(|d| (*d, self.get(*d)))
    }

    /// Renders the schedule back into the hours-string grammar, one segment per distinct range
    /// in order of first appearance, with consecutive days folded into `A-B` tokens.
    pub fn to_hours_string(&self) -> String {
        let mut groups: Vec<(TimeRange, Vec<Day>)> = vec![];
        for (day, range) in self.iter() {
            if let Some(range) = range {
                match groups.iter_mut().find(|(r, _)| r == range) {
                    Some((_, days)) => days.push(day),
                    None => groups.push((*range, vec![day])),
                }
            }
        }

        groups
            .iter()
            .map(|(range, days)| {
                format!(
                    "{} {} - {}",
                    day_tokens(days).join(", "),
                    range.open.to_12h_string(),
                    range.close.to_12h_string()
                )
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

// `days` is in week order; runs of consecutive days become `A-B`.
fn day_tokens(days: &[Day]) -> Vec<String> {
    let mut runs: Vec<(Day, Day)> = vec![];
    for day in days {
        match runs.last_mut() {
            Some((_, end)) if end.next() == *day => *end = *day,
            _ => runs.push((*day, *day)),
        }
    }
    runs.iter()
        .map(|(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{}-{}", start, end)
            }
        })
        .collect()
}
