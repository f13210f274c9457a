use crate::error::Error;
use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Week order, indexed by `Day::index`.
pub const DAYS: [Day; 7] = [
    Day::Mon,
    Day::Tue,
    Day::Wed,
    Day::Thu,
    Day::Fri,
    Day::Sat,
    Day::Sun,
];

const FULL_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

impl Day {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Day {
        DAYS[index % 7]
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// Exact three-letter abbreviation as written in hours strings.
    pub fn from_abbrev(s: &str) -> Option<Day> {
        DAYS.iter().copied().find(|d| d.abbrev() == s)
    }

    pub fn previous(self) -> Day {
        Day::from_index(self.index() + 6)
    }

    pub fn next(self) -> Day {
        Day::from_index(self.index() + 1)
    }

    /// Days from `start` to `end` inclusive, walking forward and wrapping past Sunday.
    /// Never empty: `Mon-Mon` is a single day.
    pub fn walk(start: Day, end: Day) -> Vec<Day> {
        let len = (end.index() + 7 - start.index()) % 7 + 1;
        (0..len).map(|i| Day::from_index(start.index() + i)).collect()
    }
}

impl From<Weekday> for Day {
    fn from(w: Weekday) -> Self {
        Day::from_index(w.num_days_from_monday() as usize)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

impl FromStr for Day {
    type Err = Error;

    /// Case-insensitive, three-letter or full English name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        DAYS.iter()
            .copied()
            .find(|d| d.abbrev().to_lowercase() == lower || FULL_NAMES[d.index()] == lower)
            .ok_or_else(|| Error::InvalidQuery(format!("unknown day of week '{}'", s)))
    }
}
