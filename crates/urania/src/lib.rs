pub mod angles;
pub mod ephemeris;
pub mod points;
pub mod aspects;
pub mod patterns;
pub mod analysis;
pub mod returns;

pub mod composite;
pub mod numerology;
pub mod western;

pub use analysis::{AnalysisConfig, ChartAnalysis, ChartAnalyzer, CrossChartAnalysis, Summary};
pub use aspects::{
    Aspect, AspectCatalog, AspectClass, AspectDefinition, AspectDetector, AspectFilter, AspectKind,
    AspectMotion, AspectScorer, ConfigurationError, OrbSettings, ScoringConfig,
};
pub use ephemeris::{EphemerisError, EphemerisSource, GeoLocation, LongitudeTable, PointPosition};
pub use patterns::{Pattern, PatternAggregation, PatternDetector, PatternKind, PatternSettings};
pub use points::{CelestialPoint, DataIntegrityWarning, IntegrityIssue, PointKind};
