use std::io::Write;
use tempfile::NamedTempFile;
use urania::analysis::{AnalysisConfig, ChartAnalyzer};
use urania::aspects::{AspectClass, AspectKind};
use urania::patterns::{PatternAggregation, PatternKind};
use urania::points::{CelestialPoint, PointKind};
use urania_config::{load_analysis_config_from_path, load_analyzer, parse_analysis_config};

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
exact_tolerance = 0.5

[orbs]
major_orb = 6.0
include_minor = true

[orbs.multipliers]
Sun = 1.5

[filter]
birth_time_known = false

[scoring.kind_weights]
asteroid = 0.4

[patterns]
aggregation = "weakest"
kinds = ["grand_trine", "t_square"]
"#,
    );

    let config = load_analysis_config_from_path(file.path()).unwrap();
    assert_eq!(config.exact_tolerance, 0.5);
    assert_eq!(config.orbs.major_orb, Some(6.0));
    assert!(config.orbs.include_minor);
    assert_eq!(config.orbs.per_body_orb_multiplier.get("Sun"), Some(&1.5));
    // Untouched keys keep their defaults
    assert_eq!(config.orbs.fixed_star_orb, Some(1.0));
    assert!(!config.filter.birth_time_known);
    assert!(config.filter.exclude_star_pairs);
    assert_eq!(config.scoring.kind_weights.asteroid, 0.4);
    assert_eq!(config.scoring.kind_weights.planet, 0.9);
    assert_eq!(config.patterns.aggregation, PatternAggregation::Weakest);
    assert_eq!(config.patterns.kinds, vec![PatternKind::GrandTrine, PatternKind::TSquare]);
    assert_eq!(config.catalog, AnalysisConfig::default().catalog);
}

#[test]
fn test_custom_catalog() {
    let config = parse_analysis_config(
        r#"
[[aspects]]
kind = "conjunction"
angle = 0.0
orb = 10.0
class = "major"
harmony = 0.2

[[aspects]]
kind = "opposition"
angle = 180.0
orb = 10.0
class = "major"
harmony = -0.8
"#,
    )
    .unwrap();
    assert_eq!(config.catalog.len(), 2);
    let conjunction = config.catalog.get(AspectKind::Conjunction).unwrap();
    assert_eq!(conjunction.orb, 10.0);
    assert_eq!(conjunction.class, AspectClass::Major);
    assert!(config.catalog.get(AspectKind::Trine).is_none());
}

#[test]
fn test_duplicate_catalog_angle_is_rejected() {
    let result = parse_analysis_config(
        r#"
[[aspects]]
kind = "square"
angle = 90.0
orb = 7.0
class = "major"
harmony = -0.7

[[aspects]]
kind = "quintile"
angle = 90.0
orb = 2.0
class = "minor"
harmony = 0.5
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_invalid_values_fail_validation() {
    assert!(parse_analysis_config("exact_tolerance = -1.0").is_err());
    assert!(parse_analysis_config("[orbs]\nminor_orb = -0.5").is_err());
    assert!(parse_analysis_config("[orbs.multipliers]\nMars = 0.0").is_err());
    assert!(parse_analysis_config("[scoring]\nmin_magnitude_factor = 1.5").is_err());
    assert!(parse_analysis_config("[patterns]\naggregation = \"median\"").is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("urania.toml");
    let err = load_analysis_config_from_path(&missing).unwrap_err();
    assert!(err.to_string().contains("urania.toml"));
}

#[test]
fn test_workspace_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/urania.toml");
    let config = load_analysis_config_from_path(path).unwrap();
    assert_eq!(config.orbs.per_body_orb_multiplier.get("Moon"), Some(&1.2));
    assert_eq!(config.patterns.kinds.len(), PatternKind::ALL.len());
}

#[test]
fn test_load_analyzer() {
    let file = write_config("[orbs]\ninclude_minor = true\n");
    let analyzer = load_analyzer(file.path()).unwrap();
    assert!(analyzer.config().orbs.include_minor);
}

#[test]
fn test_lowercase_multiplier_key_applies() {
    let config = parse_analysis_config("[orbs.multipliers]\nsun = 1.5\n").unwrap();
    let analyzer = ChartAnalyzer::new(config).unwrap();

    // Mean multiplier 1.25 turns the 7° square orb into 8.75°
    let sun = CelestialPoint::new("Sun", PointKind::Planet, 0.0);
    let mars = CelestialPoint::new("Mars", PointKind::Planet, 98.5);
    let aspect = analyzer.detector().calculate_aspect(&sun, &mars).unwrap();
    assert_eq!(aspect.kind(), AspectKind::Square);
    assert!((aspect.effective_orb - 8.75).abs() < 1e-12);
}

#[test]
fn test_always_include_parses() {
    let config = parse_analysis_config("[orbs]\nalways_include = [\"semi_square\"]\n").unwrap();
    assert_eq!(config.orbs.always_include, vec![AspectKind::SemiSquare]);
    assert!(!config.orbs.include_minor);
}
