//! Turns a free-form hours description such as
//! `Mon-Wed, Sat 5 pm - 12:30 am / Thu-Fri 5 pm - 1:30 am / Sun 3 pm - 11:30 pm`
//! into a [`WeeklySchedule`].
//!
//! Grammar:
//! ```text
//! hours    := segment ( "/" segment )*
//! segment  := days time "-" time
//! days     := day-tok ( "," day-tok )*
//! day-tok  := Abbrev | Abbrev "-" Abbrev
//! time     := H [ ":" MM ] ( "am" | "pm" )
//! ```

use crate::day::Day;
use crate::error::{Error, Result};
use crate::schedule::{TimeRange, WeeklySchedule};
use crate::time::{ClockTime, Meridiem};
use log::debug;
use std::sync::Arc;

pub const SEGMENT_DELIMITER: char = '/';

/// Parses one restaurant's hours. Any malformed segment fails the whole restaurant; a day
/// named by more than one segment keeps the range of the last one.
pub fn parse(name: &Arc<str>, hours: &str) -> Result<WeeklySchedule> {
    if hours.trim().is_empty() {
        return Err(Error::MissingHours {
            restaurant: name.clone(),
        });
    }

    let mut schedule = WeeklySchedule::default();
    for segment in hours.split(SEGMENT_DELIMITER).map(str::trim) {
        let (days, range) = parse_segment(segment).map_err(|reason| Error::MalformedSegment {
            restaurant: name.clone(),
            segment: segment.to_string(),
            reason,
        })?;
        for day in days {
            if let Some(previous) = schedule.set(day, range) {
                debug!("{}: {} reassigned from {} to {}", name, day, previous, range);
            }
        }
    }
    Ok(schedule)
}

fn parse_segment(segment: &str) -> std::result::Result<(Vec<Day>, TimeRange), String> {
    if segment.is_empty() {
        return Err("empty segment".to_string());
    }
    let split_at = segment
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| "missing opening and closing times".to_string())?;
    let (day_spec, times) = segment.split_at(split_at);
    let days = parse_day_spec(day_spec)?;
    let range = parse_time_range(times)?;
    Ok((days, range))
}

fn parse_day_spec(spec: &str) -> std::result::Result<Vec<Day>, String> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err("missing days".to_string());
    }
    let mut days = vec![];
    for token in spec.split(',').map(str::trim) {
        days.extend(parse_day_token(token)?);
    }
    Ok(days)
}

fn parse_day_token(token: &str) -> std::result::Result<Vec<Day>, String> {
    let day = |s: &str| Day::from_abbrev(s.trim()).ok_or_else(|| format!("unknown day '{}'", s.trim()));
    match token.split_once('-') {
        Some((start, end)) => Ok(Day::walk(day(start)?, day(end)?)),
        None => Ok(vec![day(token)?]),
    }
}

fn parse_time_range(times: &str) -> std::result::Result<TimeRange, String> {
    let mut parts = times.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(open), Some(close), None) => Ok(TimeRange::new(parse_12h(open)?, parse_12h(close)?)),
        _ => Err(format!("expected '<open> - <close>', found '{}'", times.trim())),
    }
}

fn parse_12h(s: &str) -> std::result::Result<ClockTime, String> {
    let s = s.trim();
    let invalid = || format!("invalid time '{}'", s);
    let lower = s.to_ascii_lowercase();
    let (clock, meridiem) = if let Some(clock) = lower.strip_suffix("am") {
        (clock, Meridiem::Am)
    } else if let Some(clock) = lower.strip_suffix("pm") {
        (clock, Meridiem::Pm)
    } else {
        return Err(format!("time '{}' lacks am/pm", s));
    };

    let (hour, minute) = match clock.trim_end().split_once(':') {
        Some((hour, minute)) if minute.len() == 2 => (hour, minute),
        Some(_) => return Err(invalid()),
        None => (clock.trim_end(), "0"),
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour) || hour.len() > 2 || !all_digits(minute) {
        return Err(invalid());
    }
    let hour = hour.parse::<u8>().map_err(|_| invalid())?;
    let minute = minute.parse::<u8>().map_err(|_| invalid())?;
    ClockTime::from_12h(hour, minute, meridiem).ok_or_else(invalid)
}
