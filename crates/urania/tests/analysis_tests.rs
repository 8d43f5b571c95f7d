use chrono::{Duration, TimeZone, Utc};
use urania::analysis::{AnalysisConfig, ChartAnalysis, ChartAnalyzer};
use urania::aspects::{AspectClass, AspectKind, ConfigurationError, OrbSettings};
use urania::ephemeris::{EphemerisError, LongitudeTable, PointPosition, RecordedEphemeris};
use urania::patterns::{PatternKind, PatternSettings};
use urania::points::{CelestialPoint, IntegrityIssue, PointKind};

fn natal_table() -> LongitudeTable {
    LongitudeTable::new()
        .with("Sun", PointPosition::planet(10.0, 0.98))
        .with("Moon", PointPosition::planet(130.0, 13.2))
        .with("Mercury", PointPosition::planet(25.0, -0.6))
        .with("Venus", PointPosition::planet(250.0, 1.1))
        .with("Mars", PointPosition::planet(190.0, 0.6))
        .with("Saturn", PointPosition::planet(283.0, 0.03))
        .with("Ascendant", PointPosition::angle(100.0))
        .with("Regulus", PointPosition::fixed_star(150.2, 1.35))
}

fn analyzer() -> ChartAnalyzer {
    ChartAnalyzer::new(AnalysisConfig::default()).unwrap()
}

#[test]
fn test_analysis_finds_grand_trine_and_summary() {
    let analysis = analyzer().analyze(&natal_table());

    let trines: Vec<_> = analysis.patterns_of(PatternKind::GrandTrine).collect();
    assert_eq!(trines.len(), 1);
    assert_eq!(trines[0].points, vec!["Moon", "Sun", "Venus"]);

    let summary = &analysis.summary;
    assert_eq!(summary.aspect_count, analysis.aspects.len());
    assert_eq!(
        summary.harmonious_count + summary.disharmonious_count + summary.neutral_count,
        summary.aspect_count
    );
    assert_eq!(summary.count_of(AspectKind::Trine), 3);
    assert_eq!(summary.pattern_count(PatternKind::GrandTrine), 1);
    assert!(summary.harmony_index > 0.0);
    assert!(summary.disharmony_index >= 0.0);
    assert!(analysis.aspects.iter().all(|a| a.strength.is_some()));
    assert!(analysis.warnings.is_empty());
}

#[test]
fn test_aspects_for_and_exact() {
    let analysis = analyzer().analyze(&natal_table());
    assert!(analysis.aspects_for("Sun").all(|a| a.involves("Sun")));
    // Sun-Moon, Sun-Venus and Moon-Venus are all exact trines
    let exact: Vec<_> = analysis.exact_aspects().collect();
    assert!(exact.len() >= 3);
    assert_eq!(analysis.summary.exact_count, exact.len());
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = analyzer();
    let first = analyzer.analyze(&natal_table());
    let second = analyzer.analyze(&natal_table());
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_analysis_json_round_trip() {
    let analysis = analyzer().analyze(&natal_table());
    let json = analysis.to_json().unwrap();
    assert!(json.contains("\"grand_trine\""));
    let parsed: ChartAnalysis = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.aspects.len(), analysis.aspects.len());
    assert_eq!(parsed.summary.counts_by_kind, analysis.summary.counts_by_kind);
    let kinds = |a: &ChartAnalysis| a.patterns.iter().map(|p| (p.kind, p.points.clone())).collect::<Vec<_>>();
    assert_eq!(kinds(&parsed), kinds(&analysis));
}

#[test]
fn test_batch_matches_sequential() {
    let analyzer = analyzer();
    let tables: Vec<LongitudeTable> = (0..16)
        .map(|i| {
            let shift = i as f64 * 7.5;
            LongitudeTable::new()
                .with("Sun", PointPosition::planet(10.0 + shift, 1.0))
                .with("Moon", PointPosition::planet(130.0 + shift * 2.0, 13.0))
                .with("Mars", PointPosition::planet(250.0 - shift, 0.5))
                .with("Jupiter", PointPosition::planet(100.0, 0.1))
        })
        .collect();

    let batch = analyzer.analyze_batch(&tables);
    let sequential: Vec<ChartAnalysis> = tables.iter().map(|t| analyzer.analyze(t)).collect();
    assert_eq!(batch, sequential);
}

#[test]
fn test_analyze_at_recorded_ephemeris() {
    let birth = Utc.with_ymd_and_hms(1990, 5, 15, 8, 30, 0).unwrap();
    let mut source = RecordedEphemeris::new();
    source.record(birth, natal_table());

    let analyzer = analyzer();
    let analysis = analyzer.analyze_at(&source, birth, None).unwrap();
    assert_eq!(analysis, analyzer.analyze(&natal_table()));

    let unknown = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    assert!(matches!(
        analyzer.analyze_at(&source, unknown, None),
        Err(EphemerisError::MissingChart { .. })
    ));
}

#[test]
fn test_analyze_between_orients_pairs() {
    let natal = natal_table();
    let transits = LongitudeTable::new()
        .with("Saturn", PointPosition::planet(100.5, 0.05))
        .with("Jupiter", PointPosition::planet(311.0, 0.2));

    let cross = analyzer().analyze_between(&natal, &transits);
    assert!(!cross.aspects.is_empty());
    for aspect in &cross.aspects {
        assert!(natal.get(&aspect.first.id).is_some());
        assert!(transits.get(&aspect.second.id).is_some());
    }
    assert_eq!(cross.summary.aspect_count, cross.aspects.len());

    let square = cross
        .aspects
        .iter()
        .find(|a| a.first.id == "Sun" && a.second.id == "Saturn")
        .unwrap();
    assert_eq!(square.kind(), AspectKind::Square);

    // Same id in both charts still forms an aspect
    let return_opposition = cross
        .aspects
        .iter()
        .find(|a| a.first.id == "Saturn" && a.second.id == "Saturn")
        .unwrap();
    assert_eq!(return_opposition.kind(), AspectKind::Opposition);
}

#[test]
fn test_bad_data_surfaces_as_warnings() {
    let table = natal_table()
        .with("Pluto", PointPosition::planet(f64::INFINITY, 0.01))
        .with("Chiron", PointPosition::new(urania::PointKind::Asteroid, 40.0));

    let analysis = analyzer().analyze(&table);
    assert!(analysis.point("Pluto").is_none());
    assert!(analysis.point("Chiron").is_some());
    let issues: Vec<IntegrityIssue> = analysis.warnings.iter().map(|w| w.issue).collect();
    assert!(issues.contains(&IntegrityIssue::NonFiniteLongitude));
    assert!(issues.contains(&IntegrityIssue::MissingSpeed));
}

#[test]
fn test_minor_aspects_follow_config() {
    let table = LongitudeTable::new()
        .with("Sun", PointPosition::planet(0.0, 1.0))
        .with("Venus", PointPosition::planet(45.0, 1.2));

    let without = analyzer().analyze(&table);
    assert!(without.aspects.is_empty());

    let config = AnalysisConfig {
        orbs: OrbSettings {
            include_minor: true,
            ..OrbSettings::default()
        },
        ..AnalysisConfig::default()
    };
    let with = ChartAnalyzer::new(config).unwrap().analyze(&table);
    assert_eq!(with.aspects.len(), 1);
    assert_eq!(with.aspects[0].kind(), AspectKind::SemiSquare);
    assert_eq!(with.summary.count_of_class(AspectClass::Minor), 1);
}

#[test]
fn test_config_from_json_is_validated() {
    let json = r#"{"orbs": {"major_orb": -2.0}}"#;
    let config: AnalysisConfig = serde_json::from_str(json).unwrap();
    assert!(matches!(
        ChartAnalyzer::new(config).err(),
        Some(ConfigurationError::NegativeOrb { .. })
    ));
}

#[test]
fn test_default_config_reports_yod() {
    let table = LongitudeTable::new()
        .with("Sun", PointPosition::planet(0.0, 1.0))
        .with("Moon", PointPosition::planet(60.0, 13.0))
        .with("Saturn", PointPosition::planet(210.0, 0.05));

    let analysis = analyzer().analyze(&table);
    assert_eq!(analysis.aspects.len(), 3);
    assert_eq!(analysis.summary.count_of(AspectKind::Quincunx), 2);
    let yods: Vec<_> = analysis.patterns_of(PatternKind::Yod).collect();
    assert_eq!(yods.len(), 1);
    assert_eq!(yods[0].apex.as_deref(), Some("Saturn"));

    // Without Yod in the pattern list the quincunxes stay out
    let config = AnalysisConfig {
        patterns: PatternSettings {
            kinds: vec![PatternKind::GrandTrine],
            ..PatternSettings::default()
        },
        ..AnalysisConfig::default()
    };
    let analysis = ChartAnalyzer::new(config).unwrap().analyze(&table);
    assert_eq!(analysis.aspects.len(), 1);
    assert_eq!(analysis.aspects[0].kind(), AspectKind::Sextile);
}

#[test]
fn test_analyze_points_surfaces_warnings() {
    let points = vec![
        CelestialPoint::new("Sun", PointKind::Planet, 0.0).with_speed(1.0),
        CelestialPoint::new("Moon", PointKind::Planet, f64::NAN).with_speed(13.0),
        CelestialPoint::new("Mars", PointKind::Planet, 120.0),
    ];

    let analysis = analyzer().analyze_points(points);
    assert!(analysis.point("Moon").is_none());
    assert_eq!(analysis.points.len(), 2);
    assert_eq!(analysis.aspects.len(), 1);
    let warnings: Vec<(&str, IntegrityIssue)> = analysis
        .warnings
        .iter()
        .map(|w| (w.point.as_str(), w.issue))
        .collect();
    assert_eq!(
        warnings,
        vec![
            ("Moon", IntegrityIssue::NonFiniteLongitude),
            ("Mars", IntegrityIssue::MissingSpeed)
        ]
    );
}

#[test]
fn test_exact_aspects_over_recorded_days() {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut source = RecordedEphemeris::new();
    // Sun-Mars trine: 0.5, 0.05, 0.02, 0.5, 0.05 from exact
    for (day, sun, mars) in [
        (0, 10.0, 129.5),
        (1, 11.0, 130.95),
        (2, 12.0, 132.02),
        (3, 13.0, 133.5),
        (4, 14.0, 134.05),
    ] {
        source.record(
            start + Duration::days(day),
            LongitudeTable::new()
                .with("Sun", PointPosition::planet(sun, 1.0))
                .with("Mars", PointPosition::planet(mars, 1.0))
                .with("Jupiter", PointPosition::planet(200.0, 0.1)),
        );
    }

    let analyzer = analyzer();
    let end = start + Duration::days(4);
    let exact = analyzer
        .exact_aspects_between(&source, start, end, Duration::days(1), None)
        .unwrap();
    let found: Vec<_> = exact
        .iter()
        .map(|e| (e.datetime, e.aspect.first.id.as_str(), e.aspect.second.id.as_str(), e.aspect.kind()))
        .collect();
    // The run over days 1-2 collapses to its tightest sample
    assert_eq!(
        found,
        vec![
            (start + Duration::days(2), "Sun", "Mars", AspectKind::Trine),
            (start + Duration::days(4), "Sun", "Mars", AspectKind::Trine),
        ]
    );
    assert!(exact[0].aspect.deviation < 0.03);
    assert!(exact.iter().all(|e| e.aspect.strength.is_some()));

    // Sampling past the last recorded day fails
    assert!(matches!(
        analyzer.exact_aspects_between(&source, start, end + Duration::days(1), Duration::days(1), None),
        Err(EphemerisError::MissingChart { .. })
    ));
    assert!(matches!(
        analyzer.exact_aspects_between(&source, start, end, Duration::zero(), None),
        Err(EphemerisError::InvalidWindow(_))
    ));
}
