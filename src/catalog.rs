use crate::error::{Error, Result};
use crate::query::Query;
use crate::restaurant::{Restaurant, RestaurantName, ScheduleRow};
use crate::schedule::{matcher, parser};
use log::{info, warn};
use serde::Deserialize;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// What to do with a restaurant whose hours fail to parse.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum LoadPolicy {
    /// Abort the whole load.
    #[default]
    FailClosed,
    /// Drop the restaurant with a warning.
    SkipInvalid,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRow {
    pub name: String,
    #[serde(default)]
    pub hours: Option<String>,
}

/// Restaurants in input order; read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
}

impl Catalog {
    pub fn parse_catalog(rows: impl IntoIterator<Item = RawRow>, policy: LoadPolicy) -> Result<Self> {
        let mut restaurants = vec![];
        for row in rows {
            let name = row.name.trim();
            if name.is_empty() {
                continue;
            }
            let name: RestaurantName = Arc::from(name);
            let parsed = match row.hours.as_deref() {
                Some(hours) => parser::parse(&name, hours),
                None => Err(Error::MissingHours {
                    restaurant: name.clone(),
                }),
            };
            match (parsed, policy) {
                (Ok(schedule), _) => restaurants.push(Restaurant { name, schedule }),
                (Err(e), LoadPolicy::SkipInvalid) => warn!("skipping restaurant: {}", e),
                (Err(e), LoadPolicy::FailClosed) => return Err(e),
            }
        }

        if restaurants.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        info!("Loaded {} restaurants", restaurants.len());
        Ok(Catalog { restaurants })
    }

    /// Reads `.json` files as an array of `{"name", "hours"}` objects and anything else as
    /// headerless `"name","hours"` CSV rows.
    pub fn load_from_file(path: &Path, policy: LoadPolicy) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let rows = if is_json {
            serde_json::from_str::<Vec<RawRow>>(&data)?
        } else {
            read_csv_rows(data.as_bytes())?
        };
        Catalog::parse_catalog(rows, policy)
    }

    pub fn find_open(&self, query: &Query) -> Vec<RestaurantName> {
        let (day, time) = query.resolve();
        matcher::find_open(&self.restaurants, day, time)
    }

    /// Hours strings of the restaurants whose name contains `name`, ignoring case.
    pub fn hours_of(&self, name: &str) -> Vec<(RestaurantName, String)> {
        let needle = name.trim().to_lowercase();
        self.restaurants
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .map(|r| (r.name.clone(), r.schedule.to_hours_string()))
            .collect()
    }

    pub fn render_weekly_table(&self) -> Vec<ScheduleRow> {
        self.restaurants.iter().map(ScheduleRow::from).collect()
    }
}

pub fn read_csv_rows<R: io::Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = vec![];
    for record in csv.records() {
        let record = record?;
        rows.push(RawRow {
            name: record.get(0).unwrap_or_default().to_string(),
            hours: record.get(1).map(str::to_string),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::Day;
    use crate::restaurant::CLOSED_PLACEHOLDER;
    use crate::time::ClockTime;
    use std::io::Write;

    fn row(name: &str, hours: &str) -> RawRow {
        RawRow {
            name: name.to_string(),
            hours: Some(hours.to_string()),
        }
    }

    const SAMPLE: &str = r#""Kushi Tsuru","Mon-Sun 11:30 am - 9 pm"
"Osakaya Restaurant","Mon-Thu, Sun 11:30 am - 9 pm  / Fri-Sat 11:30 am - 9:30 pm"
"The Stinking Rose","Mon-Thu, Sun 11:30 am - 10 pm  / Fri-Sat 11:30 am - 11 pm"

"Sudachi","Mon-Wed, Sat 5 pm - 12:30 am  / Thu-Fri 5 pm - 1:30 am  / Sun 3 pm - 11:30 pm"
"#;

    fn at(day: Day, hour: u8, minute: u8) -> Query {
        Query::At {
            day,
            time: ClockTime { hour, minute },
        }
    }

    fn names(found: Vec<RestaurantName>) -> Vec<String> {
        found.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_read_csv_rows() {
        let rows = read_csv_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(4, rows.len());
        assert_eq!(row("Kushi Tsuru", "Mon-Sun 11:30 am - 9 pm"), rows[0]);
        assert_eq!("Sudachi", rows[3].name);
    }

    #[test]
    fn test_find_open_keeps_catalog_order() {
        let catalog = Catalog::parse_catalog(read_csv_rows(SAMPLE.as_bytes()).unwrap(), LoadPolicy::FailClosed).unwrap();

        assert_eq!(
            vec!["Kushi Tsuru", "Osakaya Restaurant", "The Stinking Rose"],
            names(catalog.find_open(&at(Day::Tue, 12, 0)))
        );
        assert_eq!(
            vec!["Osakaya Restaurant", "The Stinking Rose", "Sudachi"],
            names(catalog.find_open(&at(Day::Fri, 21, 15)))
        );
        assert_eq!(vec!["Sudachi"], names(catalog.find_open(&at(Day::Sat, 1, 0))));
        assert!(catalog.find_open(&at(Day::Mon, 4, 0)).is_empty());
    }

    #[test]
    fn test_fail_closed_on_malformed_segment() {
        let rows = vec![
            row("Good", "Mon-Fri 9 am - 5 pm"),
            row("Bad", "Mon-Fri 9 - 5 pm"),
        ];
        match Catalog::parse_catalog(rows, LoadPolicy::FailClosed) {
            Err(Error::MalformedSegment { restaurant, .. }) => assert_eq!("Bad", &*restaurant),
            other => panic!("expected MalformedSegment, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_invalid_drops_offending_restaurant() {
        let rows = vec![
            row("Bad", "Mon-Fri 9 am - 5 pm / Sat noon - 2 pm"),
            row("Good", "Mon-Fri 9 am - 5 pm"),
            RawRow {
                name: "No Hours".to_string(),
                hours: None,
            },
        ];
        let catalog = Catalog::parse_catalog(rows, LoadPolicy::SkipInvalid).unwrap();
        assert_eq!(1, catalog.restaurants.len());
        assert_eq!("Good", &*catalog.restaurants[0].name);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(
            Catalog::parse_catalog(Vec::<RawRow>::new(), LoadPolicy::FailClosed),
            Err(Error::EmptyCatalog)
        ));
        let rows = vec![row("Bad", "whenever")];
        assert!(matches!(
            Catalog::parse_catalog(rows, LoadPolicy::SkipInvalid),
            Err(Error::EmptyCatalog)
        ));
    }

    #[test]
    fn test_hours_of_matches_name_fragment() {
        let catalog = Catalog::parse_catalog(read_csv_rows(SAMPLE.as_bytes()).unwrap(), LoadPolicy::FailClosed).unwrap();

        let found = catalog.hours_of("sudachi");
        assert_eq!(1, found.len());
        assert_eq!("Sudachi", &*found[0].0);
        assert_eq!(
            "Mon-Wed, Sat 5 pm - 12:30 am / Thu-Fri 5 pm - 1:30 am / Sun 3 pm - 11:30 pm",
            found[0].1
        );

        let found = catalog.hours_of("rose");
        assert_eq!(vec!["The Stinking Rose"], found.iter().map(|(n, _)| &**n).collect::<Vec<_>>());
        assert_eq!("Mon-Thu, Sun 11:30 am - 10 pm / Fri-Sat 11:30 am - 11 pm", found[0].1);

        assert!(catalog.hours_of("Nobu").is_empty());
    }

    #[test]
    fn test_render_weekly_table() {
        let rows = vec![row("Sudachi", "Mon-Wed, Sat 5 pm - 12:30 am / Thu-Fri 5 pm - 1:30 am")];
        let table = Catalog::parse_catalog(rows, LoadPolicy::FailClosed)
            .unwrap()
            .render_weekly_table();
        assert_eq!(1, table.len());
        assert_eq!("17:00-00:30", table[0].wed);
        assert_eq!("17:00-01:30", table[0].fri);
        assert_eq!(CLOSED_PLACEHOLDER, table[0].sun);
    }

    #[test]
    fn test_load_from_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let catalog = Catalog::load_from_file(file.path(), LoadPolicy::FailClosed).unwrap();
        assert_eq!(4, catalog.restaurants.len());
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"[{"name": "Bonchon", "hours": "Mon-Sun 11 am - 1 am"}]"#).unwrap();
        let catalog = Catalog::load_from_file(file.path(), LoadPolicy::FailClosed).unwrap();
        assert_eq!(
            vec!["Bonchon"],
            names(catalog.find_open(&at(Day::Mon, 0, 30)))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load_from_file(Path::new("does/not/exist.csv"), LoadPolicy::FailClosed);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
