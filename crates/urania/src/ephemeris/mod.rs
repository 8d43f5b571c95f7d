pub mod types;

pub use types::{GeoLocation, LongitudeTable, PointPosition, TableEntry};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors reported by an ephemeris collaborator
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("No chart recorded for {datetime}")]
    MissingChart { datetime: DateTime<Utc> },
    #[error("Failed to calculate positions at {datetime}: {message}")]
    CalculationFailed {
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("No usable longitude for {body} at {datetime}")]
    MissingBody { body: String, datetime: DateTime<Utc> },
    #[error("Invalid search window: {0}")]
    InvalidWindow(String),
}

/// Produces the longitude table for an instant and optional location.
///
/// Implementations own all I/O (ephemeris files, network). The analysis
/// core only ever sees the returned table.
pub trait EphemerisSource {
    fn positions(
        &self,
        datetime: DateTime<Utc>,
        location: Option<&GeoLocation>,
    ) -> Result<LongitudeTable, EphemerisError>;
}

/// Ephemeris backed by pre-computed tables keyed by instant.
///
/// Useful for replaying stored charts and for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordedEphemeris {
    charts: Vec<(DateTime<Utc>, LongitudeTable)>,
}

impl RecordedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, datetime: DateTime<Utc>, table: LongitudeTable) {
        match self.charts.iter_mut().find(|(dt, _)| *dt == datetime) {
            Some(entry) => entry.1 = table,
            None => self.charts.push((datetime, table)),
        }
    }
}

impl EphemerisSource for RecordedEphemeris {
    fn positions(
        &self,
        datetime: DateTime<Utc>,
        _location: Option<&GeoLocation>,
    ) -> Result<LongitudeTable, EphemerisError> {
        self.charts
            .iter()
            .find(|(dt, _)| *dt == datetime)
            .map(|(_, table)| table.clone())
            .ok_or(EphemerisError::MissingChart { datetime })
    }
}
