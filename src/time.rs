use crate::error::Error;
use chrono::{NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Every establishment is assumed to close by this hour.
pub const CLOSING_HOUR: u8 = 5;

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Option<ClockTime> {
        (hour < 24 && minute < 60).then_some(ClockTime { hour, minute })
    }

    /// 12 am is midnight, 12 pm is noon.
    pub fn from_12h(hour: u8, minute: u8, meridiem: Meridiem) -> Option<ClockTime> {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let hour = match (meridiem, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
        ClockTime::new(hour, minute)
    }

    pub fn to_12h(self) -> (u8, u8, Meridiem) {
        let meridiem = if self.hour < 12 { Meridiem::Am } else { Meridiem::Pm };
        let hour = match self.hour % 12 {
            0 => 12,
            h => h,
        };
        (hour, self.minute, meridiem)
    }

    /// Renders in the hours-string grammar, e.g. `5 pm` or `12:30 am`.
    pub fn to_12h_string(self) -> String {
        let (hour, minute, meridiem) = self.to_12h();
        let suffix = match meridiem {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        };
        if minute == 0 {
            format!("{} {}", hour, suffix)
        } else {
            format!("{}:{:02} {}", hour, minute, suffix)
        }
    }

    // Hours up to and including CLOSING_HOUR sit after midnight on the shift timeline.
    fn shift_hour(self) -> u8 {
        if self.hour <= CLOSING_HOUR {
            self.hour + 24
        } else {
            self.hour
        }
    }

    /// Orders two times on a single shift that starts after `CLOSING_HOUR` and may run past
    /// midnight, so `23:00` compares before `00:30`.
    pub fn shift_compare(a: ClockTime, b: ClockTime) -> Ordering {
        (a.shift_hour(), a.minute).cmp(&(b.shift_hour(), b.minute))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = Error;

    /// Parses a 24-hour `HH:MM` time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidQuery(format!("'{}' is not a 24-hour HH:MM time", s));
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) || minute.len() != 2 {
            return Err(invalid());
        }
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        ClockTime::new(hour, minute).ok_or_else(invalid)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(t: NaiveTime) -> Self {
        ClockTime {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}
