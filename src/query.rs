use crate::day::Day;
use crate::error::{Error, Result};
use crate::time::ClockTime;
use chrono::{Datelike, NaiveDateTime};

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    At { day: Day, time: ClockTime },
    DateTime(NaiveDateTime),
}

impl Query {
    /// Builds a query from command line style arguments. A complete day and time pair wins over
    /// a date; half a pair is rejected even when a date is given. Returns `None` when nothing
    /// was asked.
    pub fn from_args(day: Option<&str>, time: Option<&str>, date: Option<&str>) -> Result<Option<Query>> {
        match (day, time, date) {
            (Some(day), Some(time), _) => Ok(Some(Query::At {
                day: day.parse()?,
                time: time.parse()?,
            })),
            (Some(_), None, _) => Err(Error::InvalidQuery("a day needs a time".to_string())),
            (None, Some(_), _) => Err(Error::InvalidQuery("a time needs a day".to_string())),
            (None, None, Some(date)) => Ok(Some(Query::DateTime(parse_date_time(date)?))),
            (None, None, None) => Ok(None),
        }
    }

    /// Day of week (Monday first) and wall-clock time the query refers to.
    pub fn resolve(&self) -> (Day, ClockTime) {
        match self {
            Query::At { day, time } => (*day, *time),
            Query::DateTime(dt) => (Day::from(dt.weekday()), ClockTime::from(dt.time())),
        }
    }
}

pub fn parse_date_time(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| Error::InvalidQuery(format!("'{}' is not an ISO date-time", s)))
}
