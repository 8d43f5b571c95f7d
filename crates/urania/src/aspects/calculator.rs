use crate::angles::{angular_difference, signed_difference};
use crate::aspects::catalog::{AspectCatalog, OrbSettings};
use crate::aspects::types::{Aspect, AspectEndpoint, AspectMotion};
use crate::points::{CelestialPoint, PointKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Relative speeds below this (degrees/day) have no usable direction.
const MIN_RELATIVE_SPEED: f64 = 1e-6;

/// Default tolerance for flagging an aspect as exact (degrees)
pub const DEFAULT_EXACT_TOLERANCE: f64 = 1.0;

/// Which points and pairs take part in detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectFilter {
    /// Skip fixed star to fixed star pairs
    pub exclude_star_pairs: bool,
    /// Skip chart angle to chart angle pairs (Asc/Dsc, MC/IC are fixed)
    pub exclude_angle_pairs: bool,
    /// Without a birth time, chart angles are meaningless and are dropped
    pub birth_time_known: bool,
    /// Point ids to include; empty means all
    pub include_objects: Vec<String>,
}

impl Default for AspectFilter {
    fn default() -> Self {
        Self {
            exclude_star_pairs: true,
            exclude_angle_pairs: true,
            birth_time_known: true,
            include_objects: Vec::new(),
        }
    }
}

impl AspectFilter {
    pub fn admits_point(&self, point: &CelestialPoint) -> bool {
        if !self.birth_time_known && point.kind == PointKind::Angle {
            return false;
        }
        self.include_objects.is_empty() || self.include_objects.iter().any(|id| *id == point.id)
    }

    pub fn admits_pair(&self, a: &CelestialPoint, b: &CelestialPoint) -> bool {
        if self.exclude_star_pairs && a.kind == PointKind::FixedStar && b.kind == PointKind::FixedStar {
            return false;
        }
        if self.exclude_angle_pairs && a.kind == PointKind::Angle && b.kind == PointKind::Angle {
            return false;
        }
        true
    }
}

/// Finds the best-matching aspect for every eligible pair of points
#[derive(Debug, Clone)]
pub struct AspectDetector {
    catalog: AspectCatalog,
    orbs: OrbSettings,
    filter: AspectFilter,
    exact_tolerance: f64,
}

impl AspectDetector {
    /// Create a detector. Settings are assumed validated by the caller.
    pub fn new(catalog: AspectCatalog, orbs: OrbSettings, filter: AspectFilter) -> Self {
        Self {
            catalog,
            orbs,
            filter,
            exact_tolerance: DEFAULT_EXACT_TOLERANCE,
        }
    }

    pub fn with_exact_tolerance(mut self, tolerance: f64) -> Self {
        self.exact_tolerance = tolerance;
        self
    }

    pub fn catalog(&self) -> &AspectCatalog {
        &self.catalog
    }

    pub fn orbs(&self) -> &OrbSettings {
        &self.orbs
    }

    /// Compute aspects within a single chart
    pub fn detect(&self, points: &[CelestialPoint]) -> Vec<Aspect> {
        let eligible = self.eligible(points);

        // Early exit if not enough points
        if eligible.len() < 2 {
            return Vec::new();
        }

        let mut aspects = Vec::new();
        let mut examined = 0usize;
        for i in 0..eligible.len() {
            for j in (i + 1)..eligible.len() {
                let (p1, p2) = (eligible[i], eligible[j]);
                if !self.filter.admits_pair(p1, p2) {
                    continue;
                }
                examined += 1;
                if let Some(aspect) = self.calculate_aspect(p1, p2) {
                    aspects.push(aspect);
                }
            }
        }

        sort_aspects(&mut aspects);
        log::debug!(
            "{} aspects from {} pairs over {} points",
            aspects.len(),
            examined,
            eligible.len()
        );
        aspects
    }

    /// Compute aspects between two charts (synastry, transits).
    ///
    /// `first` of every aspect comes from `chart_a`. The same body may
    /// appear in both charts.
    pub fn detect_between(&self, chart_a: &[CelestialPoint], chart_b: &[CelestialPoint]) -> Vec<Aspect> {
        let side_b = self.eligible(chart_b);
        let mut aspects = Vec::new();
        for p1 in self.eligible(chart_a) {
            for &p2 in &side_b {
                if !self.filter.admits_pair(p1, p2) {
                    continue;
                }
                if let Some(aspect) = self.calculate_aspect(p1, p2) {
                    aspects.push(aspect);
                }
            }
        }
        sort_aspects(&mut aspects);
        aspects
    }

    // Admitted points, first occurrence of each id only
    fn eligible<'a>(&self, points: &'a [CelestialPoint]) -> Vec<&'a CelestialPoint> {
        let mut seen = HashSet::new();
        points
            .iter()
            .filter(|p| self.filter.admits_point(p))
            .filter(|p| seen.insert(p.id.as_str()))
            .collect()
    }

    /// Calculate the aspect between two points, if any definition is within orb
    pub fn calculate_aspect(&self, p1: &CelestialPoint, p2: &CelestialPoint) -> Option<Aspect> {
        if !(p1.longitude.is_finite() && p2.longitude.is_finite()) {
            return None;
        }

        let separation = angular_difference(p1.longitude, p2.longitude);
        let pair = self.orbs.pair_orb(p1, p2);
        let candidate = self.catalog.best_match(separation, &self.orbs, &pair)?;

        let (motion, relative_speed) = aspect_motion(
            p1.longitude,
            p2.longitude,
            p1.speed,
            p2.speed,
            candidate.definition.angle,
        );
        let signed_deviation = motion.map(|m| match m {
            AspectMotion::Applying => -candidate.deviation,
            AspectMotion::Separating => candidate.deviation,
        });

        Some(Aspect {
            first: AspectEndpoint::from(p1),
            second: AspectEndpoint::from(p2),
            definition: candidate.definition,
            separation,
            deviation: candidate.deviation,
            signed_deviation,
            motion,
            effective_orb: candidate.effective_orb,
            is_exact: candidate.deviation < self.exact_tolerance,
            is_retrograde: p1.is_retrograde() || p2.is_retrograde(),
            relative_speed,
            strength: None,
        })
    }
}

/// Sort by ascending deviation, then by pair identity.
pub fn sort_aspects(aspects: &mut [Aspect]) {
    aspects.sort_by(|a, b| {
        a.deviation
            .total_cmp(&b.deviation)
            .then_with(|| a.first.id.cmp(&b.first.id))
            .then_with(|| a.second.id.cmp(&b.second.id))
    });
}

/// Determine whether an aspect is applying (approaching exact) or separating.
///
/// Returns the motion and the relative speed; both are None unless both
/// speeds are known. Motion is also None when the relative speed is ~0.
pub fn aspect_motion(
    lon1: f64,
    lon2: f64,
    speed1: Option<f64>,
    speed2: Option<f64>,
    aspect_angle: f64,
) -> (Option<AspectMotion>, Option<f64>) {
    let (Some(speed1), Some(speed2)) = (speed1, speed2) else {
        return (None, None);
    };
    let relative_speed = speed1 - speed2;
    if relative_speed.abs() < MIN_RELATIVE_SPEED {
        return (None, Some(relative_speed));
    }

    // Rate at which the circular separation changes
    let signed = signed_difference(lon1, lon2);
    let separation = signed.abs();
    let separation_rate = if separation == 0.0 {
        relative_speed.abs()
    } else if separation >= 180.0 {
        -relative_speed.abs()
    } else if signed > 0.0 {
        relative_speed
    } else {
        -relative_speed
    };

    let offset = separation - aspect_angle;
    let deviation_rate = if offset > 0.0 {
        separation_rate
    } else if offset < 0.0 {
        -separation_rate
    } else {
        // Exactly partile: any motion moves away from exact
        return (Some(AspectMotion::Separating), Some(relative_speed));
    };

    let motion = if deviation_rate < 0.0 {
        AspectMotion::Applying
    } else {
        AspectMotion::Separating
    };
    (Some(motion), Some(relative_speed))
}
