//! Planetary returns: the next instant a body comes back to a longitude.
//!
//! The search steps forward through an [`EphemerisSource`] until the
//! body's signed offset from the target turns from negative to
//! non-negative, then bisects that step down to a minute.

use crate::angles::{normalize_degrees, signed_difference};
use crate::ephemeris::{EphemerisError, EphemerisSource, GeoLocation};
use chrono::{DateTime, Duration, Utc};

/// Width of the bracket a return is narrowed to (seconds).
pub const RETURN_PRECISION_SECONDS: i64 = 60;

/// Steps per mean orbit when scanning for a return.
const STEPS_PER_ORBIT: f64 = 720.0;

/// Extra share of an orbit searched past one full period.
const WINDOW_MARGIN: f64 = 0.1;

/// Mean sidereal period in days for bodies with a known orbit.
pub fn orbital_period_days(body: &str) -> Option<f64> {
    let period = match body.to_ascii_lowercase().as_str() {
        "sun" => 365.25,
        "moon" => 27.32,
        "mercury" => 87.97,
        "venus" => 224.70,
        "mars" => 686.98,
        "jupiter" => 4332.59,
        "saturn" => 10759.22,
        "uranus" => 30685.49,
        "neptune" => 60189.0,
        "pluto" => 90560.0,
        _ => return None,
    };
    Some(period)
}

/// Bounds and resolution of a return search.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSearch {
    pub body: String,
    /// Longitude to return to (degrees)
    pub target: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
}

impl ReturnSearch {
    /// Search one mean orbit (plus a margin) of `body` after `start`.
    pub fn for_body(body: &str, target: f64, start: DateTime<Utc>) -> Result<Self, EphemerisError> {
        let period = orbital_period_days(body)
            .ok_or_else(|| EphemerisError::InvalidWindow(format!("no orbital period known for {}", body)))?;
        let seconds = |days: f64| Duration::seconds((days * 86_400.0).round() as i64);
        Ok(Self {
            body: body.to_string(),
            target,
            start,
            end: start + seconds(period * (1.0 + WINDOW_MARGIN)),
            step: seconds(period / STEPS_PER_ORBIT),
        })
    }

    fn validate(&self) -> Result<(), EphemerisError> {
        if !self.target.is_finite() {
            return Err(EphemerisError::InvalidWindow(format!("target longitude {}", self.target)));
        }
        if self.step <= Duration::zero() {
            return Err(EphemerisError::InvalidWindow("step must be positive".to_string()));
        }
        if self.end < self.start {
            return Err(EphemerisError::InvalidWindow(format!(
                "end {} precedes start {}",
                self.end, self.start
            )));
        }
        Ok(())
    }
}

/// Signed offset of the body from the target at `datetime`.
fn offset_at<S: EphemerisSource + ?Sized>(
    source: &S,
    search: &ReturnSearch,
    datetime: DateTime<Utc>,
    location: Option<&GeoLocation>,
) -> Result<f64, EphemerisError> {
    let table = source.positions(datetime, location)?;
    let lon = table
        .get(&search.body)
        .map(|p| p.lon)
        .filter(|lon| lon.is_finite())
        .ok_or_else(|| EphemerisError::MissingBody {
            body: search.body.clone(),
            datetime,
        })?;
    Ok(signed_difference(lon, normalize_degrees(search.target)))
}

/// First instant in the window at which the body reaches the target
/// moving forward, or None when it never does.
///
/// Retrograde passes over the target are skipped; only direct crossings
/// count.
pub fn find_next_return<S: EphemerisSource + ?Sized>(
    source: &S,
    search: &ReturnSearch,
    location: Option<&GeoLocation>,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    search.validate()?;

    let mut lo = search.start;
    let mut before = offset_at(source, search, lo, location)?;
    if before == 0.0 {
        return Ok(Some(lo));
    }

    let mut steps = 0usize;
    while lo < search.end {
        let hi = (lo + search.step).min(search.end);
        let after = offset_at(source, search, hi, location)?;
        steps += 1;
        // A jump of half a circle or more is the far side wrapping, not a crossing
        if before < 0.0 && after >= 0.0 && after - before < 180.0 {
            let found = bisect(source, search, lo, hi, location)?;
            log::debug!("{} returns to {:.4} at {} after {} steps", search.body, search.target, found, steps);
            return Ok(Some(found));
        }
        lo = hi;
        before = after;
    }

    log::debug!("{} does not return to {:.4} before {}", search.body, search.target, search.end);
    Ok(None)
}

// Offset is negative at `lo` and non-negative at `hi`
fn bisect<S: EphemerisSource + ?Sized>(
    source: &S,
    search: &ReturnSearch,
    mut lo: DateTime<Utc>,
    mut hi: DateTime<Utc>,
    location: Option<&GeoLocation>,
) -> Result<DateTime<Utc>, EphemerisError> {
    let precision = Duration::seconds(RETURN_PRECISION_SECONDS);
    while hi - lo > precision {
        let mid = lo + (hi - lo) / 2;
        if offset_at(source, search, mid, location)? < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(hi)
}

/// Next solar return: the Sun back at its natal longitude.
pub fn solar_return<S: EphemerisSource + ?Sized>(
    source: &S,
    natal_sun: f64,
    after: DateTime<Utc>,
    location: Option<&GeoLocation>,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    find_next_return(source, &ReturnSearch::for_body("Sun", natal_sun, after)?, location)
}

/// Next lunar return: the Moon back at its natal longitude.
pub fn lunar_return<S: EphemerisSource + ?Sized>(
    source: &S,
    natal_moon: f64,
    after: DateTime<Utc>,
    location: Option<&GeoLocation>,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    find_next_return(source, &ReturnSearch::for_body("Moon", natal_moon, after)?, location)
}
