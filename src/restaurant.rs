use crate::schedule::{TimeRange, WeeklySchedule};
use std::sync::Arc;
use tabled::Tabled;

pub type RestaurantName = Arc<str>;

/// Width of the name column in the weekly table.
pub const NAME_WIDTH: usize = 15;
pub const CLOSED_PLACEHOLDER: &str = "--:--/--:--";

#[derive(Clone, Debug, PartialEq)]
pub struct Restaurant {
    pub name: RestaurantName,
    pub schedule: WeeklySchedule,
}

#[derive(Clone, Debug, PartialEq, Tabled)]
pub struct ScheduleRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Mon")]
    pub mon: String,
    #[tabled(rename = "Tue")]
    pub tue: String,
    #[tabled(rename = "Wed")]
    pub wed: String,
    #[tabled(rename = "Thu")]
    pub thu: String,
    #[tabled(rename = "Fri")]
    pub fri: String,
    #[tabled(rename = "Sat")]
    pub sat: String,
    #[tabled(rename = "Sun")]
    pub sun: String,
}

fn slot(range: Option<&TimeRange>) -> String {
    range.map_or_else(|| CLOSED_PLACEHOLDER.to_string(), |r| r.to_string())
}

impl From<&Restaurant> for ScheduleRow {
    fn from(r: &Restaurant) -> Self {
        let [mon, tue, wed, thu, fri, sat, sun] = crate::day::DAYS.map(|d| slot(r.schedule.get(d)));
        ScheduleRow {
            name: r.name.chars().take(NAME_WIDTH).collect(),
            mon,
            tue,
            wed,
            thu,
            fri,
            sat,
            sun,
        }
    }
}
