//! Chart analysis pipeline: points -> aspects -> scores -> patterns -> summary.

pub mod summary;
pub mod timeframe;

pub use summary::{summarize, Summary};
pub use timeframe::{ExactAspect, TIMEFRAME_EXACT_TOLERANCE};

use crate::aspects::calculator::{AspectDetector, AspectFilter, DEFAULT_EXACT_TOLERANCE};
use crate::aspects::catalog::{AspectCatalog, ConfigurationError, OrbSettings};
use crate::aspects::scoring::{AspectScorer, ScoringConfig};
use crate::aspects::types::Aspect;
use crate::ephemeris::{EphemerisError, EphemerisSource, GeoLocation, LongitudeTable};
use crate::patterns::{Pattern, PatternDetector, PatternKind, PatternSettings};
use crate::points::{points_from_table, validate_points, CelestialPoint, DataIntegrityWarning};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything that shapes an analysis run. Immutable once handed to a
/// [`ChartAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    #[serde(rename = "aspects")]
    pub catalog: AspectCatalog,
    pub orbs: OrbSettings,
    pub filter: AspectFilter,
    pub scoring: ScoringConfig,
    pub patterns: PatternSettings,
    /// Deviation below which an aspect is flagged exact (degrees)
    pub exact_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            catalog: AspectCatalog::standard(),
            orbs: OrbSettings::default(),
            filter: AspectFilter::default(),
            scoring: ScoringConfig::default(),
            patterns: PatternSettings::default(),
            exact_tolerance: DEFAULT_EXACT_TOLERANCE,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.orbs.validate()?;
        self.scoring.validate()?;
        if !(self.exact_tolerance.is_finite() && self.exact_tolerance >= 0.0) {
            return Err(ConfigurationError::InvalidTolerance(self.exact_tolerance));
        }
        Ok(())
    }
}

/// Result of analysing one chart. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAnalysis {
    pub points: Vec<CelestialPoint>,
    pub aspects: Vec<Aspect>,
    pub patterns: Vec<Pattern>,
    pub summary: Summary,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl ChartAnalysis {
    pub fn point(&self, id: &str) -> Option<&CelestialPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn aspects_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Aspect> + 'a {
        self.aspects.iter().filter(move |a| a.involves(id))
    }

    pub fn exact_aspects(&self) -> impl Iterator<Item = &Aspect> {
        self.aspects.iter().filter(|a| a.is_exact)
    }

    pub fn patterns_of(&self, kind: PatternKind) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(move |p| p.kind == kind)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Aspects between two charts (synastry, transits). `first` of every
/// aspect belongs to chart A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossChartAnalysis {
    pub aspects: Vec<Aspect>,
    pub summary: Summary,
    pub warnings: Vec<DataIntegrityWarning>,
}

/// Validated, reusable analysis pipeline.
///
/// Holds no mutable state, so one analyzer can serve many charts
/// concurrently.
#[derive(Debug, Clone)]
pub struct ChartAnalyzer {
    config: AnalysisConfig,
    detector: AspectDetector,
    scorer: AspectScorer,
    patterns: PatternDetector,
}

impl ChartAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        // Pattern aspects are looked up even when their class is switched off
        let mut orbs = config.orbs.clone();
        for kind in config.patterns.aspect_kinds() {
            if !orbs.always_include.contains(&kind) {
                orbs.always_include.push(kind);
            }
        }
        let detector = AspectDetector::new(config.catalog.clone(), orbs, config.filter.clone())
            .with_exact_tolerance(config.exact_tolerance);
        let scorer = AspectScorer::new(config.scoring.clone());
        let patterns = PatternDetector::new(config.patterns.clone());
        Ok(Self {
            config,
            detector,
            scorer,
            patterns,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn detector(&self) -> &AspectDetector {
        &self.detector
    }

    pub fn scorer(&self) -> &AspectScorer {
        &self.scorer
    }

    pub fn analyze(&self, table: &LongitudeTable) -> ChartAnalysis {
        let (points, warnings) = points_from_table(table);
        self.run(points, warnings)
    }

    pub fn analyze_points(&self, points: Vec<CelestialPoint>) -> ChartAnalysis {
        let (points, warnings) = validate_points(points);
        self.run(points, warnings)
    }

    /// Fetch positions from `source` and analyse them.
    pub fn analyze_at<S: EphemerisSource + ?Sized>(
        &self,
        source: &S,
        datetime: DateTime<Utc>,
        location: Option<&GeoLocation>,
    ) -> Result<ChartAnalysis, EphemerisError> {
        let table = source.positions(datetime, location)?;
        Ok(self.analyze(&table))
    }

    pub fn analyze_between(&self, chart_a: &LongitudeTable, chart_b: &LongitudeTable) -> CrossChartAnalysis {
        let (points_a, mut warnings) = points_from_table(chart_a);
        let (points_b, warnings_b) = points_from_table(chart_b);
        warnings.extend(warnings_b);

        let points_a = self.strip_houses(points_a);
        let points_b = self.strip_houses(points_b);
        let aspects = self.scorer.annotate(self.detector.detect_between(&points_a, &points_b));
        let (summary, summary_warnings) = summarize(&aspects, &[]);
        warnings.extend(summary_warnings);

        CrossChartAnalysis {
            aspects,
            summary,
            warnings,
        }
    }

    /// Analyse many charts in parallel. Output order matches input order.
    pub fn analyze_batch(&self, tables: &[LongitudeTable]) -> Vec<ChartAnalysis> {
        tables.par_iter().map(|table| self.analyze(table)).collect()
    }

    fn run(&self, points: Vec<CelestialPoint>, mut warnings: Vec<DataIntegrityWarning>) -> ChartAnalysis {
        let points = self.strip_houses(points);
        let aspects = self.scorer.annotate(self.detector.detect(&points));
        let patterns = self.patterns.detect(&aspects);
        let (summary, summary_warnings) = summarize(&aspects, &patterns);
        warnings.extend(summary_warnings);

        ChartAnalysis {
            points,
            aspects,
            patterns,
            summary,
            warnings,
        }
    }

    // Houses depend on the birth time as much as the angles do
    fn strip_houses(&self, mut points: Vec<CelestialPoint>) -> Vec<CelestialPoint> {
        if !self.config.filter.birth_time_known {
            for point in &mut points {
                point.house = None;
            }
        }
        points
    }
}
