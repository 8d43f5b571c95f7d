use crate::aspects::types::{Aspect, AspectClass, AspectKind, Harmony};
use crate::patterns::{Pattern, PatternKind};
use crate::points::{DataIntegrityWarning, IntegrityIssue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chart-level roll-up of aspect strengths and counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of strengths of harmonious aspects
    pub harmony_index: f64,
    /// Magnitude of the summed strengths of disharmonious aspects
    pub disharmony_index: f64,
    pub aspect_count: usize,
    pub exact_count: usize,
    pub harmonious_count: usize,
    pub disharmonious_count: usize,
    pub neutral_count: usize,
    pub counts_by_class: BTreeMap<AspectClass, usize>,
    pub counts_by_kind: BTreeMap<AspectKind, usize>,
    pub patterns_by_kind: BTreeMap<PatternKind, usize>,
}

impl Summary {
    /// Harmony minus disharmony
    pub fn net_harmony(&self) -> f64 {
        self.harmony_index - self.disharmony_index
    }

    pub fn count_of(&self, kind: AspectKind) -> usize {
        self.counts_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn count_of_class(&self, class: AspectClass) -> usize {
        self.counts_by_class.get(&class).copied().unwrap_or(0)
    }

    pub fn pattern_count(&self, kind: PatternKind) -> usize {
        self.patterns_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Roll up scored aspects and patterns.
///
/// Aspects without a strength still count but add nothing to the indices;
/// each one yields an `Unscored` warning.
pub fn summarize(aspects: &[Aspect], patterns: &[Pattern]) -> (Summary, Vec<DataIntegrityWarning>) {
    let mut summary = Summary {
        aspect_count: aspects.len(),
        ..Summary::default()
    };
    let mut warnings = Vec::new();

    for aspect in aspects {
        *summary.counts_by_class.entry(aspect.definition.class).or_insert(0) += 1;
        *summary.counts_by_kind.entry(aspect.kind()).or_insert(0) += 1;
        if aspect.is_exact {
            summary.exact_count += 1;
        }

        let harmony = aspect.definition.harmony_class();
        match harmony {
            Harmony::Harmonious => summary.harmonious_count += 1,
            Harmony::Disharmonious => summary.disharmonious_count += 1,
            Harmony::Neutral => summary.neutral_count += 1,
        }

        let Some(strength) = aspect.strength else {
            let warning = DataIntegrityWarning {
                point: format!("{}-{}", aspect.first.id, aspect.second.id),
                issue: IntegrityIssue::Unscored,
            };
            log::warn!("{}", warning);
            warnings.push(warning);
            continue;
        };
        match harmony {
            Harmony::Harmonious => summary.harmony_index += strength.abs(),
            Harmony::Disharmonious => summary.disharmony_index += strength.abs(),
            Harmony::Neutral => {}
        }
    }

    for pattern in patterns {
        *summary.patterns_by_kind.entry(pattern.kind).or_insert(0) += 1;
    }

    (summary, warnings)
}
