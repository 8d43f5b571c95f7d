//! Planetary days and hours.
//!
//! Hours are counted in the Chaldean order from 06:00 local time, with the
//! first hour of each day ruled by the day's planet. Times before 06:00
//! belong to the previous planetary day.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Slowest to fastest
pub const CHALDEAN_ORDER: [&str; 7] = ["Saturn", "Jupiter", "Mars", "Sun", "Venus", "Mercury", "Moon"];

const DAY_START_HOUR: i64 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryHour {
    pub weekday: String,
    pub day_ruler: String,
    pub hour_ruler: String,
}

pub fn day_ruler(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Moon",
        Weekday::Tue => "Mars",
        Weekday::Wed => "Mercury",
        Weekday::Thu => "Jupiter",
        Weekday::Fri => "Venus",
        Weekday::Sat => "Saturn",
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Planetary day and hour for a local date and time.
pub fn planetary_hour(local: NaiveDateTime) -> PlanetaryHour {
    let day_start = local - Duration::hours(DAY_START_HOUR);
    let weekday = day_start.weekday();
    let ruler = day_ruler(weekday);

    let start_index = CHALDEAN_ORDER.iter().position(|p| *p == ruler).unwrap_or(0);
    let hour_index = (start_index + day_start.hour() as usize) % CHALDEAN_ORDER.len();

    PlanetaryHour {
        weekday: weekday_name(weekday).to_string(),
        day_ruler: ruler.to_string(),
        hour_ruler: CHALDEAN_ORDER[hour_index].to_string(),
    }
}
