//! Aspect catalog and orb configuration.
//!
//! The catalog is validated when it is built and is read-only during
//! detection. Orb overrides are applied per lookup, never stored.

use crate::aspects::types::{AspectClass, AspectDefinition, AspectKind};
use crate::points::{CelestialPoint, PointKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thiserror::Error;

/// Two angles closer than this are the same angle.
const ANGLE_EPSILON: f64 = 1e-9;

/// Invalid catalog or analysis configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Angle {angle} for {kind} is outside [0, 180]")]
    AngleOutOfRange { kind: AspectKind, angle: f64 },
    #[error("{kind} at {angle} duplicates the angle of {existing}")]
    DuplicateAngle {
        kind: AspectKind,
        angle: f64,
        existing: AspectKind,
    },
    #[error("{kind} is already registered")]
    DuplicateKind { kind: AspectKind },
    #[error("Orb for {what} must be a non-negative number, got {orb}")]
    NegativeOrb { what: String, orb: f64 },
    #[error("Orb multiplier for {body} must be a positive number, got {value}")]
    InvalidMultiplier { body: String, value: f64 },
    #[error("Weight for {what} is invalid: {value}")]
    InvalidWeight { what: String, value: f64 },
    #[error("Exact tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),
}

fn check_orb(what: impl Into<String>, orb: f64) -> Result<(), ConfigurationError> {
    if orb.is_finite() && orb >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NegativeOrb {
            what: what.into(),
            orb,
        })
    }
}

/// Per-run orb overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbSettings {
    /// Replaces the orb of every major definition
    pub major_orb: Option<f64>,
    /// Replaces the orb of every minor definition
    pub minor_orb: Option<f64>,
    pub include_minor: bool,
    /// Minor kinds looked up even when `include_minor` is off
    pub always_include: Vec<AspectKind>,
    /// Body id -> orb multiplier, matched case-insensitively
    #[serde(rename = "multipliers")]
    pub per_body_orb_multiplier: BTreeMap<String, f64>,
    /// Cap for any pair involving a fixed star
    pub fixed_star_orb: Option<f64>,
    /// Cap for any pair involving an asteroid
    pub asteroid_orb: Option<f64>,
}

impl Default for OrbSettings {
    fn default() -> Self {
        Self {
            major_orb: None,
            minor_orb: None,
            include_minor: false,
            always_include: Vec::new(),
            per_body_orb_multiplier: BTreeMap::new(),
            fixed_star_orb: Some(1.0),
            asteroid_orb: Some(1.5),
        }
    }
}

impl OrbSettings {
    /// No overrides at all: every definition uses its own orb.
    pub fn unrestricted() -> Self {
        Self {
            fixed_star_orb: None,
            asteroid_orb: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(orb) = self.major_orb {
            check_orb("major aspects", orb)?;
        }
        if let Some(orb) = self.minor_orb {
            check_orb("minor aspects", orb)?;
        }
        if let Some(orb) = self.fixed_star_orb {
            check_orb("fixed stars", orb)?;
        }
        if let Some(orb) = self.asteroid_orb {
            check_orb("asteroids", orb)?;
        }
        for (body, &value) in &self.per_body_orb_multiplier {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::InvalidMultiplier {
                    body: body.clone(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Whether `definition` takes part in lookups at all.
    pub fn admits(&self, definition: &AspectDefinition) -> bool {
        self.include_minor || definition.class == AspectClass::Major || self.always_include.contains(&definition.kind)
    }

    /// Orb multiplier for one body id, 1.0 when none is configured.
    pub fn multiplier_for(&self, id: &str) -> f64 {
        self.per_body_orb_multiplier
            .iter()
            .find(|(body, _)| body.eq_ignore_ascii_case(id))
            .map(|(_, &value)| value)
            .unwrap_or(1.0)
    }

    /// Orb scaling for a specific pair of points.
    pub fn pair_orb(&self, a: &CelestialPoint, b: &CelestialPoint) -> PairOrb {
        let multiplier = (self.multiplier_for(&a.id) + self.multiplier_for(&b.id)) / 2.0;

        let involves = |kind: PointKind| a.kind == kind || b.kind == kind;
        let mut cap: Option<f64> = None;
        if involves(PointKind::FixedStar) {
            cap = min_option(cap, self.fixed_star_orb);
        }
        if involves(PointKind::Asteroid) {
            cap = min_option(cap, self.asteroid_orb);
        }

        PairOrb { multiplier, cap }
    }

    /// Orb of `definition` before pair scaling.
    pub fn base_orb(&self, definition: &AspectDefinition) -> f64 {
        let class_override = match definition.class {
            AspectClass::Major => self.major_orb,
            AspectClass::Minor => self.minor_orb,
        };
        class_override.unwrap_or(definition.orb)
    }

    pub fn effective_orb(&self, definition: &AspectDefinition, pair: &PairOrb) -> f64 {
        let scaled = self.base_orb(definition) * pair.multiplier;
        match pair.cap {
            Some(cap) => scaled.min(cap),
            None => scaled,
        }
    }
}

fn min_option(current: Option<f64>, other: Option<f64>) -> Option<f64> {
    match (current, other) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Orb scaling that applies to one pair of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairOrb {
    pub multiplier: f64,
    pub cap: Option<f64>,
}

impl Default for PairOrb {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            cap: None,
        }
    }
}

/// A definition that matches a separation within orb
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCandidate {
    pub definition: AspectDefinition,
    pub deviation: f64,
    pub effective_orb: f64,
}

impl AspectCandidate {
    /// Deviation as a fraction of the orb; 0 is exact.
    pub fn relative_deviation(&self) -> f64 {
        if self.effective_orb > 0.0 {
            self.deviation / self.effective_orb
        } else {
            0.0
        }
    }

    /// Ordering used to pick the best match: tighter relative deviation,
    /// then major before minor, then lower angle.
    fn closeness_cmp(&self, other: &Self) -> Ordering {
        self.relative_deviation()
            .total_cmp(&other.relative_deviation())
            .then(self.definition.class.cmp(&other.definition.class))
            .then(self.definition.angle.total_cmp(&other.definition.angle))
    }
}

/// Ordered set of aspect definitions, strictly ascending by angle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AspectDefinition>", into = "Vec<AspectDefinition>")]
pub struct AspectCatalog {
    definitions: Vec<AspectDefinition>,
}

impl AspectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in definitions, major and minor.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for kind in AspectKind::ALL {
            catalog.definitions.push(AspectDefinition::standard(kind));
        }
        catalog
            .definitions
            .sort_by(|a, b| a.angle.total_cmp(&b.angle));
        catalog
    }

    /// Only the five major aspects.
    pub fn major() -> Self {
        let mut catalog = Self::standard();
        catalog
            .definitions
            .retain(|d| d.class == AspectClass::Major);
        catalog
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = AspectDefinition>,
    ) -> Result<Self, ConfigurationError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.register(definition)?;
        }
        Ok(catalog)
    }

    /// Add a definition, keeping angles unique and ascending.
    pub fn register(&mut self, definition: AspectDefinition) -> Result<(), ConfigurationError> {
        let AspectDefinition { kind, angle, .. } = definition;
        if !(angle.is_finite() && (0.0..=180.0).contains(&angle)) {
            return Err(ConfigurationError::AngleOutOfRange { kind, angle });
        }
        check_orb(kind.name(), definition.orb)?;
        if !definition.harmony.is_finite() {
            return Err(ConfigurationError::InvalidWeight {
                what: format!("{} harmony", kind.name()),
                value: definition.harmony,
            });
        }
        if self.definitions.iter().any(|d| d.kind == kind) {
            return Err(ConfigurationError::DuplicateKind { kind });
        }
        if let Some(existing) = self
            .definitions
            .iter()
            .find(|d| (d.angle - angle).abs() < ANGLE_EPSILON)
        {
            return Err(ConfigurationError::DuplicateAngle {
                kind,
                angle,
                existing: existing.kind,
            });
        }

        let index = self.definitions.partition_point(|d| d.angle < angle);
        self.definitions.insert(index, definition);
        Ok(())
    }

    pub fn definitions(&self) -> &[AspectDefinition] {
        &self.definitions
    }

    pub fn get(&self, kind: AspectKind) -> Option<&AspectDefinition> {
        self.definitions.iter().find(|d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions whose exact angle lies within their effective orb of
    /// `separation`, closest first.
    pub fn lookup_candidates(
        &self,
        separation: f64,
        settings: &OrbSettings,
        pair: &PairOrb,
    ) -> Vec<AspectCandidate> {
        let mut candidates: Vec<AspectCandidate> = self
            .definitions
            .iter()
            .filter(|d| settings.admits(d))
            .filter_map(|definition| {
                let effective_orb = settings.effective_orb(definition, pair);
                let deviation = (separation - definition.angle).abs();
                (deviation <= effective_orb).then_some(AspectCandidate {
                    definition: *definition,
                    deviation,
                    effective_orb,
                })
            })
            .collect();
        candidates.sort_by(|a, b| a.closeness_cmp(b));
        candidates
    }

    /// The single best definition for `separation`, if any is within orb.
    pub fn best_match(
        &self,
        separation: f64,
        settings: &OrbSettings,
        pair: &PairOrb,
    ) -> Option<AspectCandidate> {
        self.lookup_candidates(separation, settings, pair)
            .into_iter()
            .next()
    }
}

impl TryFrom<Vec<AspectDefinition>> for AspectCatalog {
    type Error = ConfigurationError;

    fn try_from(definitions: Vec<AspectDefinition>) -> Result<Self, Self::Error> {
        Self::from_definitions(definitions)
    }
}

impl From<AspectCatalog> for Vec<AspectDefinition> {
    fn from(catalog: AspectCatalog) -> Self {
        catalog.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_ascending() {
        let catalog = AspectCatalog::standard();
        assert_eq!(catalog.len(), 14);
        for pair in catalog.definitions().windows(2) {
            assert!(pair[0].angle < pair[1].angle);
        }
        assert_eq!(AspectCatalog::major().len(), 5);
    }

    #[test]
    fn test_register_rejects_duplicates_and_range() {
        let mut catalog = AspectCatalog::new();
        catalog
            .register(AspectDefinition::standard(AspectKind::Trine))
            .unwrap();

        let dup_angle = AspectDefinition::new(AspectKind::Quintile, 120.0, 2.0, AspectClass::Minor, 0.5);
        assert!(matches!(
            catalog.register(dup_angle),
            Err(ConfigurationError::DuplicateAngle { existing: AspectKind::Trine, .. })
        ));

        let out_of_range = AspectDefinition::new(AspectKind::Square, 190.0, 6.0, AspectClass::Major, -0.7);
        assert!(matches!(
            catalog.register(out_of_range),
            Err(ConfigurationError::AngleOutOfRange { .. })
        ));

        let negative_orb = AspectDefinition::standard(AspectKind::Square).with_orb(-1.0);
        assert!(matches!(
            catalog.register(negative_orb),
            Err(ConfigurationError::NegativeOrb { .. })
        ));

        assert!(matches!(
            catalog.register(AspectDefinition::standard(AspectKind::Trine)),
            Err(ConfigurationError::DuplicateKind { .. })
        ));
    }

    #[test]
    fn test_register_keeps_order() {
        let catalog = AspectCatalog::from_definitions([
            AspectDefinition::standard(AspectKind::Opposition),
            AspectDefinition::standard(AspectKind::Conjunction),
            AspectDefinition::standard(AspectKind::Square),
        ])
        .unwrap();
        let angles: Vec<f64> = catalog.definitions().iter().map(|d| d.angle).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0]);
    }

    #[test]
    fn test_lookup_prefers_tighter_relative_deviation() {
        let catalog = AspectCatalog::from_definitions([
            AspectDefinition::new(AspectKind::Trine, 120.0, 8.0, AspectClass::Major, 0.8),
            AspectDefinition::new(AspectKind::BiQuintile, 144.0, 2.0, AspectClass::Minor, 0.5),
            AspectDefinition::new(AspectKind::SesquiSquare, 135.0, 12.0, AspectClass::Minor, -0.6),
        ])
        .unwrap();
        let settings = OrbSettings {
            include_minor: true,
            ..OrbSettings::unrestricted()
        };

        // 126: trine dev 6/8 = 0.75, sesqui-square dev 9/12 = 0.75 -> tie, major wins
        let best = catalog.best_match(126.0, &settings, &PairOrb::default()).unwrap();
        assert_eq!(best.definition.kind, AspectKind::Trine);

        // 128: trine 1.0, sesqui-square 7/12
        let best = catalog.best_match(128.0, &settings, &PairOrb::default()).unwrap();
        assert_eq!(best.definition.kind, AspectKind::SesquiSquare);
    }

    #[test]
    fn test_lookup_excludes_minor_unless_requested() {
        let catalog = AspectCatalog::standard();
        let settings = OrbSettings::default();
        assert!(catalog
            .lookup_candidates(150.0, &settings, &PairOrb::default())
            .is_empty());

        let with_minor = OrbSettings {
            include_minor: true,
            ..OrbSettings::default()
        };
        let best = catalog.best_match(150.0, &with_minor, &PairOrb::default()).unwrap();
        assert_eq!(best.definition.kind, AspectKind::Quincunx);
    }

    #[test]
    fn test_always_include_admits_single_minor_kind() {
        let catalog = AspectCatalog::standard();
        let settings = OrbSettings {
            always_include: vec![AspectKind::Quincunx],
            ..OrbSettings::default()
        };
        let best = catalog.best_match(151.0, &settings, &PairOrb::default()).unwrap();
        assert_eq!(best.definition.kind, AspectKind::Quincunx);
        // Other minor kinds stay out
        assert!(catalog.best_match(45.0, &settings, &PairOrb::default()).is_none());
    }

    #[test]
    fn test_multiplier_ignores_case() {
        let mut settings = OrbSettings::default();
        settings.per_body_orb_multiplier.insert("sun".to_string(), 1.5);
        assert_eq!(settings.multiplier_for("Sun"), 1.5);
        assert_eq!(settings.multiplier_for("SUN"), 1.5);
        assert_eq!(settings.multiplier_for("Moon"), 1.0);
    }

    #[test]
    fn test_effective_orb_caps_and_multipliers() {
        let mut settings = OrbSettings::default();
        settings.per_body_orb_multiplier.insert("Sun".to_string(), 1.5);
        let trine = AspectDefinition::standard(AspectKind::Trine);

        let sun = CelestialPoint::new("Sun", PointKind::Planet, 0.0);
        let moon = CelestialPoint::new("Moon", PointKind::Planet, 0.0);
        let spica = CelestialPoint::new("Spica", PointKind::FixedStar, 0.0);

        let pair = settings.pair_orb(&sun, &moon);
        assert!((settings.effective_orb(&trine, &pair) - 10.0).abs() < 1e-9);

        let pair = settings.pair_orb(&sun, &spica);
        assert!((settings.effective_orb(&trine, &pair) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_bad_multiplier() {
        let mut settings = OrbSettings::default();
        settings.per_body_orb_multiplier.insert("Moon".to_string(), 0.0);
        assert!(matches!(
            settings.validate(),
            Err(ConfigurationError::InvalidMultiplier { .. })
        ));
    }

    #[test]
    fn test_catalog_deserialize_validates() {
        let json = r#"[
            {"kind": "trine", "angle": 120.0, "orb": 8.0, "class": "major", "harmony": 0.8},
            {"kind": "square", "angle": 120.0, "orb": 7.0, "class": "major", "harmony": -0.7}
        ]"#;
        let result: Result<AspectCatalog, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
