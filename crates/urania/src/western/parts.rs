//! Arabic parts (lots).
//!
//! Each part is `Ascendant + A - B`. Fortune and Spirit swap A and B in
//! night charts.

use crate::angles::normalize_degrees;
use crate::points::{CelestialPoint, PointKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArabicPart {
    Fortune,
    Spirit,
    Love,
    Passion,
    Success,
    Karma,
    Commerce,
}

impl ArabicPart {
    pub const ALL: [ArabicPart; 7] = [
        ArabicPart::Fortune,
        ArabicPart::Spirit,
        ArabicPart::Love,
        ArabicPart::Passion,
        ArabicPart::Success,
        ArabicPart::Karma,
        ArabicPart::Commerce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ArabicPart::Fortune => "Part of Fortune",
            ArabicPart::Spirit => "Part of Spirit",
            ArabicPart::Love => "Part of Love",
            ArabicPart::Passion => "Part of Passion",
            ArabicPart::Success => "Part of Success",
            ArabicPart::Karma => "Part of Karma",
            ArabicPart::Commerce => "Part of Commerce",
        }
    }

    /// (added, subtracted) bodies for a day chart
    fn operands(self) -> (&'static str, &'static str) {
        match self {
            ArabicPart::Fortune => ("Moon", "Sun"),
            ArabicPart::Spirit => ("Sun", "Moon"),
            ArabicPart::Love => ("Venus", "Sun"),
            ArabicPart::Passion => ("Mars", "Venus"),
            ArabicPart::Success => ("Jupiter", "Sun"),
            ArabicPart::Karma => ("Saturn", "Sun"),
            ArabicPart::Commerce => ("Mercury", "Sun"),
        }
    }

    fn reverses_at_night(self) -> bool {
        matches!(self, ArabicPart::Fortune | ArabicPart::Spirit)
    }
}

/// A chart is diurnal when the Sun is above the horizon, i.e. in the half
/// of the zodiac running from the Descendant forward to the Ascendant.
pub fn is_day_chart(sun: f64, ascendant: f64) -> bool {
    normalize_degrees(sun - ascendant) >= 180.0
}

/// Longitude of `part`, given a lookup of body longitudes.
pub fn part_longitude(
    part: ArabicPart,
    ascendant: f64,
    is_day: bool,
    longitude_of: impl Fn(&str) -> Option<f64>,
) -> Option<f64> {
    let (mut plus, mut minus) = part.operands();
    if part.reverses_at_night() && !is_day {
        std::mem::swap(&mut plus, &mut minus);
    }
    Some(normalize_degrees(ascendant + longitude_of(plus)? - longitude_of(minus)?))
}

/// Every part computable from `points`, as [`PointKind::Part`] points.
///
/// Needs the Sun, Moon and Ascendant; parts whose other body is missing
/// are skipped.
pub fn arabic_parts(points: &[CelestialPoint]) -> Vec<CelestialPoint> {
    let longitude_of = |id: &str| {
        points
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .map(|p| p.longitude)
    };
    let (Some(sun), Some(_), Some(ascendant)) = (
        longitude_of("Sun"),
        longitude_of("Moon"),
        longitude_of("Ascendant"),
    ) else {
        return Vec::new();
    };
    let is_day = is_day_chart(sun, ascendant);

    ArabicPart::ALL
        .iter()
        .filter_map(|&part| {
            part_longitude(part, ascendant, is_day, longitude_of)
                .map(|lon| CelestialPoint::new(part.name(), PointKind::Part, lon))
        })
        .collect()
}
