//! Aspect strength scoring.
//!
//! `strength = harmony × orb_tightness × significance`. Scoring is a pure
//! function of the aspect and the static [`ScoringConfig`]; re-scoring the
//! same list with the same config yields identical strengths.

use crate::aspects::catalog::ConfigurationError;
use crate::aspects::types::{Aspect, AspectEndpoint};
use crate::points::PointKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in significance of named bodies
const BODY_WEIGHTS: &[(&str, f64)] = &[
    ("sun", 1.2),
    ("moon", 1.2),
    ("mercury", 1.0),
    ("venus", 1.0),
    ("mars", 1.0),
    ("jupiter", 0.9),
    ("saturn", 0.9),
    ("uranus", 0.8),
    ("neptune", 0.8),
    ("pluto", 0.8),
    ("chiron", 0.8),
    ("north node", 0.8),
    ("south node", 0.8),
    ("lilith", 0.7),
    ("ascendant", 1.1),
    ("midheaven", 1.1),
];

// Logistic curve over visual magnitude, centred on the median of the
// astrologically used stars.
const MAGNITUDE_STEEPNESS: f64 = 0.4;
const MAGNITUDE_MIDPOINT: f64 = 3.45;

/// Significance of points that have no explicit body weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindWeights {
    pub planet: f64,
    pub asteroid: f64,
    pub fixed_star: f64,
    pub angle: f64,
    pub part: f64,
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            planet: 0.9,
            asteroid: 0.6,
            fixed_star: 0.9,
            angle: 1.0,
            part: 0.6,
        }
    }
}

impl KindWeights {
    pub fn weight(&self, kind: PointKind) -> f64 {
        match kind {
            PointKind::Planet => self.planet,
            PointKind::Asteroid => self.asteroid,
            PointKind::FixedStar => self.fixed_star,
            PointKind::Angle => self.angle,
            PointKind::Part => self.part,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Body id -> significance; matched case-insensitively
    pub body_weights: BTreeMap<String, f64>,
    pub kind_weights: KindWeights,
    /// Factor range for fixed-star magnitude weighting
    pub min_magnitude_factor: f64,
    pub max_magnitude_factor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            body_weights: BODY_WEIGHTS
                .iter()
                .map(|(id, w)| (id.to_string(), *w))
                .collect(),
            kind_weights: KindWeights::default(),
            min_magnitude_factor: 0.8,
            max_magnitude_factor: 1.2,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let check = |what: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigurationError::InvalidWeight {
                    what: what.to_string(),
                    value,
                })
            }
        };
        for (body, &weight) in &self.body_weights {
            check(body, weight)?;
        }
        let k = &self.kind_weights;
        check("planet", k.planet)?;
        check("asteroid", k.asteroid)?;
        check("fixed_star", k.fixed_star)?;
        check("angle", k.angle)?;
        check("part", k.part)?;
        check("min_magnitude_factor", self.min_magnitude_factor)?;
        check("max_magnitude_factor", self.max_magnitude_factor)?;
        if self.min_magnitude_factor > self.max_magnitude_factor {
            return Err(ConfigurationError::InvalidWeight {
                what: "min_magnitude_factor above max_magnitude_factor".to_string(),
                value: self.min_magnitude_factor,
            });
        }
        Ok(())
    }
}

/// `1 - deviation / orb`, clamped to [0, 1]. A zero orb only admits
/// exact aspects, which score 1.
pub fn orb_tightness(deviation: f64, effective_orb: f64) -> f64 {
    if effective_orb <= 0.0 {
        return 1.0;
    }
    (1.0 - deviation / effective_orb).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default)]
pub struct AspectScorer {
    config: ScoringConfig,
}

impl AspectScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Magnitude weighting for a fixed star; brighter (lower) magnitudes
    /// score higher.
    pub fn magnitude_factor(&self, magnitude: f64) -> f64 {
        let min = self.config.min_magnitude_factor;
        let max = self.config.max_magnitude_factor;
        let falloff = (max - min) / (1.0 + (-MAGNITUDE_STEEPNESS * (magnitude - MAGNITUDE_MIDPOINT)).exp());
        (max - falloff).clamp(min, max)
    }

    fn endpoint_weight(&self, endpoint: &AspectEndpoint) -> f64 {
        let base = self
            .config
            .body_weights
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(&endpoint.id))
            .map(|(_, w)| *w)
            .unwrap_or_else(|| self.config.kind_weights.weight(endpoint.kind));

        match (endpoint.kind, endpoint.magnitude) {
            (PointKind::FixedStar, Some(magnitude)) => base * self.magnitude_factor(magnitude),
            _ => base,
        }
    }

    /// Body-pair significance: mean of both endpoint weights.
    pub fn significance(&self, aspect: &Aspect) -> f64 {
        (self.endpoint_weight(&aspect.first) + self.endpoint_weight(&aspect.second)) / 2.0
    }

    pub fn score(&self, aspect: &Aspect) -> f64 {
        aspect.definition.harmony
            * orb_tightness(aspect.deviation, aspect.effective_orb)
            * self.significance(aspect)
    }

    /// Return the aspects with their strengths filled in.
    pub fn annotate(&self, aspects: Vec<Aspect>) -> Vec<Aspect> {
        aspects
            .into_iter()
            .map(|mut aspect| {
                aspect.strength = Some(self.score(&aspect));
                aspect
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orb_tightness() {
        assert_eq!(orb_tightness(0.0, 8.0), 1.0);
        assert_eq!(orb_tightness(4.0, 8.0), 0.5);
        assert_eq!(orb_tightness(8.0, 8.0), 0.0);
        assert_eq!(orb_tightness(9.0, 8.0), 0.0);
        assert_eq!(orb_tightness(0.0, 0.0), 1.0);
    }

    #[test]
    fn test_magnitude_factor_prefers_bright_stars() {
        let scorer = AspectScorer::default();
        let sirius = scorer.magnitude_factor(-1.46);
        let median = scorer.magnitude_factor(3.45);
        let faint = scorer.magnitude_factor(6.0);
        assert!(sirius > median && median > faint);
        assert!((median - 1.0).abs() < 1e-9);
        assert!((0.8..=1.2).contains(&sirius));
        assert!((0.8..=1.2).contains(&faint));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = ScoringConfig {
            min_magnitude_factor: 1.5,
            ..ScoringConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
