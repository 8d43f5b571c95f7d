//! Composite charts built from two natal charts.

use crate::angles::midpoint;
use crate::ephemeris::{GeoLocation, LongitudeTable, PointPosition};
use chrono::{DateTime, Utc};

/// Midpoint composite: every point present in both tables placed at the
/// shorter-arc midpoint of its two longitudes.
///
/// Order follows `chart_a`. Speeds are averaged when both are known;
/// houses are dropped since composite cusps are not derived here.
pub fn midpoint_table(chart_a: &LongitudeTable, chart_b: &LongitudeTable) -> LongitudeTable {
    let mut composite = LongitudeTable::new();
    for (id, a) in chart_a.iter() {
        let Some(b) = chart_b.get(id) else {
            continue;
        };
        if !(a.lon.is_finite() && b.lon.is_finite()) {
            log::warn!("{}: cannot take a midpoint of a non-finite longitude", id);
            continue;
        }

        let mut position = PointPosition::new(a.kind, midpoint(a.lon, b.lon));
        position.speed_lon = match (a.speed_lon, b.speed_lon) {
            (Some(s1), Some(s2)) => Some((s1 + s2) / 2.0),
            _ => None,
        };
        position.lat = match (a.lat, b.lat) {
            (Some(l1), Some(l2)) => Some((l1 + l2) / 2.0),
            _ => None,
        };
        position.magnitude = a.magnitude.or(b.magnitude);
        composite.insert(id, position);
    }
    composite
}

/// Davison chart: the instant and place halfway between two births.
///
/// The returned pair is handed to the ephemeris collaborator to cast the
/// chart. Longitude takes the shorter way around the globe.
pub fn davison_midpoint(
    time_a: DateTime<Utc>,
    location_a: &GeoLocation,
    time_b: DateTime<Utc>,
    location_b: &GeoLocation,
) -> (DateTime<Utc>, GeoLocation) {
    let instant = time_a + (time_b - time_a) / 2;

    let lon = midpoint(location_a.lon + 180.0, location_b.lon + 180.0) - 180.0;
    let location = GeoLocation {
        lat: (location_a.lat + location_b.lat) / 2.0,
        lon,
    };
    (instant, location)
}
