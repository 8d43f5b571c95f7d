use serde::Deserialize;
use std::fs;
use std::path::Path;
use urania::analysis::{AnalysisConfig, ChartAnalyzer};

/// Common relative locations of `configs/urania.toml`, from the workspace
/// root and from a crate directory.
pub const CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    analysis: Option<AnalysisConfig>,
}

/// Try the common relative paths for `configs/urania.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    for p in &CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            log::info!("Loaded analysis config from {}", p);
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", CONFIG_PATHS);
}

/// Parse and validate an analysis config.
///
/// Settings may sit at the top level of the file or under an
/// `[analysis]` table; the table wins when both are present. Missing
/// settings take their defaults.
pub fn parse_analysis_config(text: &str) -> anyhow::Result<AnalysisConfig> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    let config = match root.analysis {
        Some(config) => config,
        None => toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?,
    };
    config.validate()?;
    Ok(config)
}

pub fn load_analysis_config() -> anyhow::Result<AnalysisConfig> {
    let text = read_config_toml_text()?;
    parse_analysis_config(&text)
}

pub fn load_analysis_config_from_path(path: impl AsRef<Path>) -> anyhow::Result<AnalysisConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let config = parse_analysis_config(&text)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    log::info!("Loaded analysis config from {}", path.display());
    Ok(config)
}

/// Like [`load_analysis_config`], but falls back to the defaults when no
/// config file exists. A file that exists and is invalid is still an error.
pub fn load_analysis_config_or_default() -> anyhow::Result<AnalysisConfig> {
    match CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
        Some(p) => load_analysis_config_from_path(p),
        None => {
            log::info!("No urania.toml found; using default analysis config");
            Ok(AnalysisConfig::default())
        }
    }
}

/// Build an analyzer from the config file at `path`.
pub fn load_analyzer(path: impl AsRef<Path>) -> anyhow::Result<ChartAnalyzer> {
    let config = load_analysis_config_from_path(path)?;
    Ok(ChartAnalyzer::new(config)?)
}
