pub mod calculator;
pub mod catalog;
pub mod graph;
pub mod scoring;
pub mod types;

pub use calculator::{aspect_motion, sort_aspects, AspectDetector, AspectFilter, DEFAULT_EXACT_TOLERANCE};
pub use catalog::{AspectCandidate, AspectCatalog, ConfigurationError, OrbSettings, PairOrb};
pub use graph::AspectGraph;
pub use scoring::{orb_tightness, AspectScorer, KindWeights, ScoringConfig};
pub use types::{
    format_duration, Aspect, AspectClass, AspectDefinition, AspectEndpoint, AspectKind, AspectMotion,
    Harmony,
};
