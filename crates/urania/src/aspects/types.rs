use crate::points::{CelestialPoint, PointKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every aspect the engine knows about.
///
/// Adding a kind here forces every exhaustive match (names, default
/// angles, pattern roles) to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    SemiSextile,
    SemiSquare,
    SesquiSquare,
    Quintile,
    BiQuintile,
    Septile,
    Novile,
    Decile,
}

impl AspectKind {
    pub const ALL: [AspectKind; 14] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
        AspectKind::Quincunx,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::SesquiSquare,
        AspectKind::Quintile,
        AspectKind::BiQuintile,
        AspectKind::Septile,
        AspectKind::Novile,
        AspectKind::Decile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Opposition => "Opposition",
            AspectKind::Trine => "Trine",
            AspectKind::Square => "Square",
            AspectKind::Sextile => "Sextile",
            AspectKind::Quincunx => "Quincunx",
            AspectKind::SemiSextile => "Semi-Sextile",
            AspectKind::SemiSquare => "Semi-Square",
            AspectKind::SesquiSquare => "Sesqui-Square",
            AspectKind::Quintile => "Quintile",
            AspectKind::BiQuintile => "Bi-Quintile",
            AspectKind::Septile => "Septile",
            AspectKind::Novile => "Novile",
            AspectKind::Decile => "Decile",
        }
    }

    /// Exact angle in degrees
    pub fn default_angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::SesquiSquare => 135.0,
            AspectKind::Quintile => 72.0,
            AspectKind::BiQuintile => 144.0,
            AspectKind::Septile => 360.0 / 7.0,
            AspectKind::Novile => 40.0,
            AspectKind::Decile => 36.0,
        }
    }

    pub fn default_class(self) -> AspectClass {
        match self {
            AspectKind::Conjunction
            | AspectKind::Opposition
            | AspectKind::Trine
            | AspectKind::Square
            | AspectKind::Sextile => AspectClass::Major,
            _ => AspectClass::Minor,
        }
    }

    pub fn default_orb(self) -> f64 {
        match self {
            AspectKind::Conjunction | AspectKind::Opposition | AspectKind::Trine => 8.0,
            AspectKind::Square => 7.0,
            AspectKind::Sextile => 6.0,
            AspectKind::Quincunx => 3.0,
            AspectKind::Septile | AspectKind::Novile | AspectKind::Decile => 1.5,
            _ => 2.0,
        }
    }

    /// Signed harmony weight in [-1, 1]; positive is harmonious.
    pub fn default_harmony(self) -> f64 {
        // 0-100 interpretive scores rescaled as (score - 50) / 50
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => -0.8,
            AspectKind::Trine => 0.8,
            AspectKind::Square => -0.7,
            AspectKind::Sextile => 0.6,
            AspectKind::Quincunx => -0.4,
            AspectKind::SemiSextile => 0.4,
            AspectKind::SemiSquare => -0.5,
            AspectKind::SesquiSquare => -0.6,
            AspectKind::Quintile => 0.5,
            AspectKind::BiQuintile => 0.5,
            AspectKind::Septile => 0.2,
            AspectKind::Novile => 0.3,
            AspectKind::Decile => 0.0,
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectClass {
    Major,
    Minor,
}

/// How the harmony weight of a definition reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Harmony {
    Harmonious,
    Disharmonious,
    Neutral,
}

/// One entry of the aspect catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    /// Exact angle in degrees, [0, 180]
    pub angle: f64,
    /// Default orb in degrees
    pub orb: f64,
    pub class: AspectClass,
    /// Signed base weight: positive harmonious, negative disharmonious
    pub harmony: f64,
}

impl AspectDefinition {
    pub fn new(kind: AspectKind, angle: f64, orb: f64, class: AspectClass, harmony: f64) -> Self {
        Self {
            kind,
            angle,
            orb,
            class,
            harmony,
        }
    }

    /// The definition with the built-in angle, orb, class and weight for `kind`.
    pub fn standard(kind: AspectKind) -> Self {
        Self::new(
            kind,
            kind.default_angle(),
            kind.default_orb(),
            kind.default_class(),
            kind.default_harmony(),
        )
    }

    pub fn with_orb(mut self, orb: f64) -> Self {
        self.orb = orb;
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn harmony_class(&self) -> Harmony {
        if self.harmony > 0.0 {
            Harmony::Harmonious
        } else if self.harmony < 0.0 {
            Harmony::Disharmonious
        } else {
            Harmony::Neutral
        }
    }
}

/// Whether the gap between two points is closing or widening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMotion {
    Applying,
    Separating,
}

/// Reference to a point in an aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectEndpoint {
    pub id: String,
    pub kind: PointKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
}

impl From<&CelestialPoint> for AspectEndpoint {
    fn from(point: &CelestialPoint) -> Self {
        Self {
            id: point.id.clone(),
            kind: point.kind,
            magnitude: point.magnitude,
        }
    }
}

/// A detected aspect between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub first: AspectEndpoint,
    pub second: AspectEndpoint,
    pub definition: AspectDefinition,
    /// Circular separation of the two longitudes, [0, 180]
    pub separation: f64,
    /// Distance from the exact angle, [0, effective_orb]
    pub deviation: f64,
    /// Negative while applying, positive while separating; None without speeds
    pub signed_deviation: Option<f64>,
    pub motion: Option<AspectMotion>,
    /// Orb actually used for this pair
    pub effective_orb: f64,
    /// Within the exact tolerance
    pub is_exact: bool,
    /// Whether either point is retrograde
    pub is_retrograde: bool,
    /// Difference of the two speeds (degrees per day)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_speed: Option<f64>,
    /// Signed strength, set by the scorer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

impl Aspect {
    pub fn kind(&self) -> AspectKind {
        self.definition.kind
    }

    pub fn involves(&self, id: &str) -> bool {
        self.first.id == id || self.second.id == id
    }

    /// The partner of `id` in this aspect.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.first.id == id {
            Some(&self.second.id)
        } else if self.second.id == id {
            Some(&self.first.id)
        } else {
            None
        }
    }

    /// Order-independent identity of the pair.
    pub fn pair_key(&self) -> (&str, &str) {
        let (a, b) = (self.first.id.as_str(), self.second.id.as_str());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Days until the aspect perfects, for applying aspects with known speeds.
    pub fn days_to_exact(&self) -> Option<f64> {
        match (self.motion, self.relative_speed) {
            (Some(AspectMotion::Applying), Some(rel)) if rel.abs() > f64::EPSILON => {
                Some(self.deviation / rel.abs())
            }
            _ => None,
        }
    }
}

/// Render a number of days as hours, days, months or years.
pub fn format_duration(days: f64) -> String {
    let days = days.abs();
    if days == 0.0 {
        "Stationary".to_string()
    } else if days < 1.0 {
        format!("{:.1}h", days * 24.0)
    } else if days < 30.0 {
        format!("{:.1}d", days)
    } else if days < 365.0 {
        format!("{:.1}m", days / 30.44)
    } else {
        format!("{:.1}y", days / 365.25)
    }
}
