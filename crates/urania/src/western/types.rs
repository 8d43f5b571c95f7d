//! Per-chart Western profile combining the helpers of this module.

use crate::points::{CelestialPoint, PointKind};
use crate::western::decans::{decan_info, DecanInfo};
use crate::western::degrees::{analyze_degree, elevations, DegreeAnalysis, Elevation};
use crate::western::dignities::{assess_dignity, DignityResult};
use crate::western::lunar::{moon_phase, MoonPhase};
use crate::western::parts::arabic_parts;
use crate::western::signs::{longitude_to_zodiac, Sign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointProfile {
    pub id: String,
    pub sign: Sign,
    pub zodiac: String,
    pub decan: DecanInfo,
    pub degree: DegreeAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dignity: Option<DignityResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<Elevation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    pub retrograde: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WesternProfile {
    pub points: Vec<PointProfile>,
    pub parts: Vec<CelestialPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon_phase: Option<MoonPhase>,
}

/// Build the profile of a chart. `modern` selects modern rulerships for
/// dignities and decans.
pub fn western_profile(points: &[CelestialPoint], modern: bool) -> WesternProfile {
    let elevations = elevations(points);
    let find = |id: &str| points.iter().find(|p| p.id.eq_ignore_ascii_case(id));

    let profiles = points
        .iter()
        .map(|point| PointProfile {
            id: point.id.clone(),
            sign: Sign::from_longitude(point.longitude),
            zodiac: longitude_to_zodiac(point.longitude, false),
            decan: decan_info(point.longitude, modern),
            degree: analyze_degree(point.longitude),
            dignity: (point.kind == PointKind::Planet)
                .then(|| assess_dignity(&point.id, Sign::from_longitude(point.longitude), !modern)),
            elevation: elevations
                .iter()
                .find(|(id, _)| *id == point.id)
                .map(|(_, e)| *e),
            house: point.house,
            retrograde: point.is_retrograde(),
        })
        .collect();

    let moon_phase = match (find("Sun"), find("Moon")) {
        (Some(sun), Some(moon)) => Some(moon_phase(sun.longitude, moon.longitude)),
        _ => None,
    };

    WesternProfile {
        points: profiles,
        parts: arabic_parts(points),
        moon_phase,
    }
}
