//! Scan an ephemeris over a date range for aspects that perfect.

use super::ChartAnalyzer;
use crate::aspects::types::{Aspect, AspectKind};
use crate::ephemeris::{EphemerisError, EphemerisSource, GeoLocation};
use crate::points::points_from_table;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Deviation (degrees) within which a sampled aspect counts as exact.
pub const TIMEFRAME_EXACT_TOLERANCE: f64 = 0.1;

/// An aspect found exact at one sampled instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExactAspect {
    pub datetime: DateTime<Utc>,
    pub aspect: Aspect,
}

type PairKey = (String, String, AspectKind);

impl ChartAnalyzer {
    /// Sample `source` from `start` to `end` inclusive every `step` and
    /// collect the aspects within [`TIMEFRAME_EXACT_TOLERANCE`] of exact.
    ///
    /// A pair that stays exact over consecutive samples is reported once,
    /// at its tightest sample. Results are in chronological order.
    pub fn exact_aspects_between<S: EphemerisSource + ?Sized>(
        &self,
        source: &S,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
        location: Option<&GeoLocation>,
    ) -> Result<Vec<ExactAspect>, EphemerisError> {
        if step <= Duration::zero() {
            return Err(EphemerisError::InvalidWindow("step must be positive".to_string()));
        }

        let mut found: Vec<ExactAspect> = Vec::new();
        // Pairs exact at the previous sample -> index into `found`
        let mut open: HashMap<PairKey, usize> = HashMap::new();
        let mut samples = 0usize;
        let mut datetime = start;

        while datetime <= end {
            let table = source.positions(datetime, location)?;
            let (points, _) = points_from_table(&table);
            let aspects = self.scorer.annotate(self.detector.detect(&self.strip_houses(points)));
            samples += 1;

            let mut still_open = HashMap::new();
            for aspect in aspects {
                if aspect.deviation > TIMEFRAME_EXACT_TOLERANCE {
                    continue;
                }
                let key = (aspect.first.id.clone(), aspect.second.id.clone(), aspect.kind());
                match open.get(&key) {
                    Some(&index) => {
                        if aspect.deviation < found[index].aspect.deviation {
                            found[index] = ExactAspect { datetime, aspect };
                        }
                        still_open.insert(key, index);
                    }
                    None => {
                        still_open.insert(key, found.len());
                        found.push(ExactAspect { datetime, aspect });
                    }
                }
            }
            open = still_open;
            datetime += step;
        }

        found.sort_by_key(|exact| exact.datetime);
        log::debug!("{} exact aspects over {} samples", found.len(), samples);
        Ok(found)
    }
}
