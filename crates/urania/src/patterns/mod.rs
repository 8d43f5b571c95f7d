//! Chart pattern detection.
//!
//! Patterns are found over the scored aspect list of a single chart. A
//! point may take part in several patterns; each configuration is
//! reported once per kind and participant set. Kites are reported along
//! with the Grand Trine they extend, and Grand Crosses along with their
//! T-squares.

pub mod detector;
pub mod types;

pub use detector::PatternDetector;
pub use types::{Pattern, PatternAggregation, PatternKind, PatternSettings};
