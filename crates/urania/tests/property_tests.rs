use proptest::prelude::*;
use std::collections::HashSet;
use urania::analysis::{AnalysisConfig, ChartAnalyzer};
use urania::angles::{angular_difference, normalize_degrees};
use urania::aspects::{AspectCatalog, AspectDetector, AspectFilter, AspectScorer, OrbSettings};
use urania::ephemeris::{LongitudeTable, PointPosition};
use urania::patterns::PatternDetector;
use urania::points::{CelestialPoint, PointKind};

fn chart(longitudes: &[f64]) -> Vec<CelestialPoint> {
    longitudes
        .iter()
        .enumerate()
        .map(|(i, lon)| CelestialPoint::new(format!("p{}", i), PointKind::Planet, *lon).with_speed(1.0 - 0.1 * i as f64))
        .collect()
}

fn table(longitudes: &[f64]) -> LongitudeTable {
    longitudes
        .iter()
        .enumerate()
        .map(|(i, lon)| (format!("p{}", i), PointPosition::planet(*lon, 0.5 + i as f64)))
        .collect()
}

proptest! {
    #[test]
    fn separation_is_symmetric_and_bounded(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        let ab = angular_difference(a, b);
        let ba = angular_difference(b, a);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert!((0.0..=180.0).contains(&ab));
    }

    #[test]
    fn normalized_longitude_is_in_range(value in -1.0e6f64..1.0e6) {
        let n = normalize_degrees(value);
        prop_assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn detected_aspects_are_within_orb(longitudes in prop::collection::vec(0.0f64..360.0, 2..12)) {
        let orbs = OrbSettings { include_minor: true, ..OrbSettings::default() };
        let detector = AspectDetector::new(AspectCatalog::standard(), orbs, AspectFilter::default());
        for aspect in detector.detect(&chart(&longitudes)) {
            prop_assert!(aspect.deviation >= 0.0);
            prop_assert!(aspect.deviation <= aspect.effective_orb + 1e-9);
            prop_assert!((0.0..=180.0).contains(&aspect.separation));
            prop_assert!(aspect.first.id != aspect.second.id);
        }
    }

    #[test]
    fn strengths_are_bounded(longitudes in prop::collection::vec(0.0f64..360.0, 2..10)) {
        let detector = AspectDetector::new(AspectCatalog::standard(), OrbSettings::default(), AspectFilter::default());
        let scored = AspectScorer::default().annotate(detector.detect(&chart(&longitudes)));
        for aspect in &scored {
            let strength = aspect.strength.unwrap_or(f64::NAN);
            prop_assert!(strength.is_finite());
            // harmony and tightness are unit bounded; weights top out at 1.2
            prop_assert!(strength.abs() <= 1.2 + 1e-9);
        }
    }

    #[test]
    fn scoring_is_idempotent(longitudes in prop::collection::vec(0.0f64..360.0, 2..10)) {
        let detector = AspectDetector::new(AspectCatalog::standard(), OrbSettings::default(), AspectFilter::default());
        let scorer = AspectScorer::default();
        let once = scorer.annotate(detector.detect(&chart(&longitudes)));
        let twice = scorer.annotate(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn analysis_is_deterministic(longitudes in prop::collection::vec(0.0f64..360.0, 0..10)) {
        let analyzer = ChartAnalyzer::new(AnalysisConfig::default()).unwrap();
        let table = table(&longitudes);
        prop_assert_eq!(analyzer.analyze(&table), analyzer.analyze(&table));
    }

    #[test]
    fn patterns_are_unique_and_closed(
        base in prop::collection::vec(0u8..12, 3..10),
        jitter in prop::collection::vec(-2.0f64..2.0, 10),
    ) {
        // Snap to a 30° grid so configurations actually occur
        let longitudes: Vec<f64> = base
            .iter()
            .zip(jitter.iter())
            .map(|(slot, j)| *slot as f64 * 30.0 + 15.0 + j)
            .collect();
        let detector = AspectDetector::new(AspectCatalog::standard(), OrbSettings::default(), AspectFilter::default());
        let aspects = detector.detect(&chart(&longitudes));
        let patterns = PatternDetector::default().detect(&aspects);

        let mut seen = HashSet::new();
        for pattern in &patterns {
            let key = (pattern.kind, pattern.participant_set().join(","));
            prop_assert!(seen.insert(key));
            prop_assert_eq!(pattern.points.len(), pattern.kind.point_count());
            prop_assert_eq!(pattern.aspects.len(), pattern.kind.aspect_count());
            for aspect in &pattern.aspects {
                prop_assert!(aspects.contains(aspect));
            }
        }
    }
}
