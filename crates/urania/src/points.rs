//! Celestial points and input validation.
//!
//! A [`LongitudeTable`] from the ephemeris collaborator is turned into a
//! list of [`CelestialPoint`]s. Malformed entries never abort the run: they
//! are skipped or degraded and reported as [`DataIntegrityWarning`]s.

use crate::angles::normalize_degrees;
use crate::ephemeris::LongitudeTable;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    Planet,
    Asteroid,
    FixedStar,
    /// Ascendant, Midheaven, Descendant, IC
    Angle,
    /// Calculated points such as Arabic parts
    Part,
}

impl PointKind {
    /// Whether this kind of point is expected to carry a speed.
    pub fn expects_speed(self) -> bool {
        matches!(self, PointKind::Planet | PointKind::Asteroid)
    }
}

/// A point on the ecliptic. Immutable once computed for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialPoint {
    pub id: String,
    pub kind: PointKind,
    /// Ecliptic longitude in [0, 360)
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Degrees per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

impl CelestialPoint {
    pub fn new(id: impl Into<String>, kind: PointKind, longitude: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            longitude: normalize_degrees(longitude),
            latitude: None,
            speed: None,
            magnitude: None,
            house: None,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed.map(|s| s < 0.0).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// Longitude was NaN or infinite; the point was dropped.
    NonFiniteLongitude,
    /// A moving body had no usable speed; applying/separating is omitted.
    MissingSpeed,
    /// A fixed star had no magnitude; magnitude weighting is neutral.
    MissingMagnitude,
    /// House number outside 1-12; the house was dropped.
    InvalidHouse,
    /// An aspect reached aggregation without a strength.
    Unscored,
}

/// Non-fatal data problem attached to one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataIntegrityWarning {
    pub point: String,
    pub issue: IntegrityIssue,
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.issue {
            IntegrityIssue::NonFiniteLongitude => "longitude is not a finite number; point skipped",
            IntegrityIssue::MissingSpeed => "no speed; applying/separating unavailable",
            IntegrityIssue::MissingMagnitude => "fixed star without magnitude",
            IntegrityIssue::InvalidHouse => "house number outside 1-12; ignored",
            IntegrityIssue::Unscored => "aspect was not scored",
        };
        write!(f, "{}: {}", self.point, what)
    }
}

fn warn(point: &str, issue: IntegrityIssue, warnings: &mut Vec<DataIntegrityWarning>) {
    let warning = DataIntegrityWarning {
        point: point.to_string(),
        issue,
    };
    log::warn!("{}", warning);
    warnings.push(warning);
}

fn check_point(mut point: CelestialPoint, warnings: &mut Vec<DataIntegrityWarning>) -> Option<CelestialPoint> {
    if !point.longitude.is_finite() {
        warn(&point.id, IntegrityIssue::NonFiniteLongitude, warnings);
        return None;
    }
    point.longitude = normalize_degrees(point.longitude);
    point.latitude = point.latitude.filter(|l| l.is_finite());

    point.speed = point.speed.filter(|s| s.is_finite());
    if point.speed.is_none() && point.kind.expects_speed() {
        warn(&point.id, IntegrityIssue::MissingSpeed, warnings);
    }

    point.magnitude = point.magnitude.filter(|m| m.is_finite());
    if point.magnitude.is_none() && point.kind == PointKind::FixedStar {
        warn(&point.id, IntegrityIssue::MissingMagnitude, warnings);
    }

    if point.house.is_some_and(|h| !(1..=12).contains(&h)) {
        warn(&point.id, IntegrityIssue::InvalidHouse, warnings);
        point.house = None;
    }

    Some(point)
}

/// Check caller-built points, dropping unusable ones and collecting
/// integrity warnings.
pub fn validate_points(
    points: impl IntoIterator<Item = CelestialPoint>,
) -> (Vec<CelestialPoint>, Vec<DataIntegrityWarning>) {
    let mut warnings = Vec::new();
    let mut total = 0;
    let accepted: Vec<CelestialPoint> = points
        .into_iter()
        .filter_map(|point| {
            total += 1;
            check_point(point, &mut warnings)
        })
        .collect();

    log::debug!(
        "accepted {} of {} points ({} warnings)",
        accepted.len(),
        total,
        warnings.len()
    );

    (accepted, warnings)
}

/// Convert a longitude table into points, collecting integrity warnings.
pub fn points_from_table(table: &LongitudeTable) -> (Vec<CelestialPoint>, Vec<DataIntegrityWarning>) {
    validate_points(table.iter().map(|(id, pos)| CelestialPoint {
        id: id.to_string(),
        kind: pos.kind,
        longitude: pos.lon,
        latitude: pos.lat,
        speed: pos.speed_lon,
        magnitude: pos.magnitude,
        house: pos.house,
    }))
}
