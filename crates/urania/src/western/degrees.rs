//! Special degrees and elevation.

use crate::angles::angular_difference;
use crate::points::{CelestialPoint, PointKind};
use crate::western::signs::{degree_in_sign, Modality, Sign};
use serde::{Deserialize, Serialize};

const CARDINAL_CRITICAL: &[u32] = &[0, 13, 26];
const FIXED_CRITICAL: &[u32] = &[8, 9, 21, 22];
const MUTABLE_CRITICAL: &[u32] = &[4, 17];

/// Within this distance of the Midheaven a point is elevated
pub const ELEVATED_ORB: f64 = 10.0;
pub const VERY_ELEVATED_ORB: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeQuality {
    Neutral,
    /// 29th degree
    Urgent,
    /// First degree of a sign
    Fresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeAnalysis {
    pub degree: f64,
    pub is_critical: bool,
    pub is_anaretic: bool,
    pub quality: DegreeQuality,
}

pub fn analyze_degree(longitude: f64) -> DegreeAnalysis {
    let degree = degree_in_sign(longitude);
    let critical = match Sign::from_longitude(longitude).modality() {
        Modality::Cardinal => CARDINAL_CRITICAL,
        Modality::Fixed => FIXED_CRITICAL,
        Modality::Mutable => MUTABLE_CRITICAL,
    };
    let is_anaretic = degree >= 29.0;
    let quality = if is_anaretic {
        DegreeQuality::Urgent
    } else if degree < 1.0 {
        DegreeQuality::Fresh
    } else {
        DegreeQuality::Neutral
    };

    DegreeAnalysis {
        degree,
        is_critical: critical.contains(&(degree.trunc() as u32)),
        is_anaretic,
        quality,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Elevation {
    pub distance_from_mc: f64,
    pub is_elevated: bool,
    pub is_very_elevated: bool,
}

pub fn elevation(longitude: f64, midheaven: f64) -> Elevation {
    let distance_from_mc = angular_difference(longitude, midheaven);
    Elevation {
        distance_from_mc,
        is_elevated: distance_from_mc <= ELEVATED_ORB,
        is_very_elevated: distance_from_mc <= VERY_ELEVATED_ORB,
    }
}

/// Elevation of every non-angle point, if the chart has a Midheaven.
pub fn elevations(points: &[CelestialPoint]) -> Vec<(String, Elevation)> {
    let Some(mc) = points.iter().find(|p| p.id.eq_ignore_ascii_case("midheaven")) else {
        return Vec::new();
    };
    points
        .iter()
        .filter(|p| p.kind != PointKind::Angle)
        .map(|p| (p.id.clone(), elevation(p.longitude, mc.longitude)))
        .collect()
}
