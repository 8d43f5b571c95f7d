use crate::aspects::types::{Aspect, AspectKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multi-point aspect configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    GrandTrine,
    TSquare,
    GrandCross,
    Yod,
    Kite,
}

impl PatternKind {
    pub const ALL: [PatternKind; 5] = [
        PatternKind::GrandTrine,
        PatternKind::TSquare,
        PatternKind::GrandCross,
        PatternKind::Yod,
        PatternKind::Kite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternKind::GrandTrine => "Grand Trine",
            PatternKind::TSquare => "T-Square",
            PatternKind::GrandCross => "Grand Cross",
            PatternKind::Yod => "Yod",
            PatternKind::Kite => "Kite",
        }
    }

    /// Number of participating points
    pub fn point_count(self) -> usize {
        match self {
            PatternKind::GrandTrine | PatternKind::TSquare | PatternKind::Yod => 3,
            PatternKind::GrandCross | PatternKind::Kite => 4,
        }
    }

    /// Number of constituent aspects
    pub fn aspect_count(self) -> usize {
        match self {
            PatternKind::GrandTrine | PatternKind::TSquare | PatternKind::Yod => 3,
            PatternKind::GrandCross | PatternKind::Kite => 6,
        }
    }

    /// Aspect kinds the pattern is built from
    pub fn aspect_kinds(self) -> &'static [AspectKind] {
        match self {
            PatternKind::GrandTrine => &[AspectKind::Trine],
            PatternKind::TSquare | PatternKind::GrandCross => &[AspectKind::Square, AspectKind::Opposition],
            PatternKind::Yod => &[AspectKind::Sextile, AspectKind::Quincunx],
            PatternKind::Kite => &[AspectKind::Trine, AspectKind::Sextile, AspectKind::Opposition],
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How constituent aspect strengths combine into a pattern strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternAggregation {
    #[default]
    Mean,
    Sum,
    /// The constituent with the smallest absolute strength
    Weakest,
}

impl PatternAggregation {
    pub fn aggregate(self, strengths: &[f64]) -> Option<f64> {
        if strengths.is_empty() {
            return None;
        }
        let value = match self {
            PatternAggregation::Mean => strengths.iter().sum::<f64>() / strengths.len() as f64,
            PatternAggregation::Sum => strengths.iter().sum(),
            PatternAggregation::Weakest => strengths
                .iter()
                .copied()
                .min_by(|a, b| a.abs().total_cmp(&b.abs()))?,
        };
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSettings {
    pub aggregation: PatternAggregation,
    /// Kinds to look for
    pub kinds: Vec<PatternKind>,
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self {
            aggregation: PatternAggregation::Mean,
            kinds: PatternKind::ALL.to_vec(),
        }
    }
}

impl PatternSettings {
    pub fn enabled(&self, kind: PatternKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Every aspect kind some enabled pattern is built from
    pub fn aspect_kinds(&self) -> Vec<AspectKind> {
        let mut kinds: Vec<AspectKind> = self.kinds.iter().flat_map(|k| k.aspect_kinds()).copied().collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }
}

/// A detected configuration.
///
/// `points` is ordered by role:
/// - Grand Trine: the three vertices in id order
/// - T-Square: the two opposed points, then the apex
/// - Grand Cross: the four corners walking around the cross
/// - Yod: the two sextile points, then the apex
/// - Kite: the head (trine vertex opposite the tail), the two wings, then the tail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub points: Vec<String>,
    /// Focal point, for patterns that have one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apex: Option<String>,
    pub aspects: Vec<Aspect>,
    /// Aggregated constituent strength; None when no constituent is scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

impl Pattern {
    pub fn involves(&self, id: &str) -> bool {
        self.points.iter().any(|p| p == id)
    }

    /// Participants in id order; identifies the configuration regardless of role.
    pub fn participant_set(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.points.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
