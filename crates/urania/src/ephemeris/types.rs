use crate::points::PointKind;
use serde::{Deserialize, Serialize};

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Position of one point as produced by the ephemeris collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPosition {
    pub kind: PointKind,
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Latitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Speed in longitude (degrees per day)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_lon: Option<f64>,
    /// Visual magnitude (fixed stars)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// House number 1-12
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
}

impl PointPosition {
    pub fn new(kind: PointKind, lon: f64) -> Self {
        Self {
            kind,
            lon,
            lat: None,
            speed_lon: None,
            magnitude: None,
            house: None,
        }
    }

    pub fn planet(lon: f64, speed_lon: f64) -> Self {
        Self::new(PointKind::Planet, lon).with_speed(speed_lon)
    }

    pub fn asteroid(lon: f64, speed_lon: f64) -> Self {
        Self::new(PointKind::Asteroid, lon).with_speed(speed_lon)
    }

    pub fn fixed_star(lon: f64, magnitude: f64) -> Self {
        let mut position = Self::new(PointKind::FixedStar, lon);
        position.magnitude = Some(magnitude);
        position
    }

    pub fn angle(lon: f64) -> Self {
        Self::new(PointKind::Angle, lon)
    }

    pub fn with_speed(mut self, speed_lon: f64) -> Self {
        self.speed_lon = Some(speed_lon);
        self
    }

    pub fn with_lat(mut self, lat: f64) -> Self {
        self.lat = Some(lat);
        self
    }

    pub fn with_house(mut self, house: u8) -> Self {
        self.house = Some(house);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub id: String,
    #[serde(flatten)]
    pub position: PointPosition,
}

/// Ordered mapping from point identity to position.
///
/// Insertion order is preserved and is the "chart order" used to give
/// aspect pairs a stable identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LongitudeTable {
    entries: Vec<TableEntry>,
}

impl LongitudeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the position for `id`.
    pub fn insert(&mut self, id: impl Into<String>, position: PointPosition) {
        let id = id.into();
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry.position = position,
            None => self.entries.push(TableEntry { id, position }),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, id: impl Into<String>, position: PointPosition) -> Self {
        self.insert(id, position);
        self
    }

    pub fn get(&self, id: &str) -> Option<&PointPosition> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PointPosition)> {
        self.entries.iter().map(|e| (e.id.as_str(), &e.position))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a table from its JSON array form:
    /// `[{"id": "Sun", "kind": "planet", "lon": 10.5, "speed_lon": 0.98}, ...]`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(String, PointPosition)> for LongitudeTable {
    fn from_iter<I: IntoIterator<Item = (String, PointPosition)>>(iter: I) -> Self {
        let mut table = LongitudeTable::new();
        for (id, position) in iter {
            table.insert(id, position);
        }
        table
    }
}
