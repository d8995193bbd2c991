use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config directory not found")]
    NoDirFound,
}

/// Linter settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintSettings {
    /// Extra tool names accepted on top of the built-in list.
    #[serde(default)]
    pub extra_tools: Vec<String>,
}

/// Diagram layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramSettings {
    /// Maximum pixel width of one rank row before wrapping.
    #[serde(default = "default_max_row_width")]
    pub max_row_width: f64,
    /// Horizontal gap between sibling nodes.
    #[serde(default = "default_node_gap")]
    pub node_gap: f64,
    /// Vertical gap between ranks.
    #[serde(default = "default_rank_gap")]
    pub rank_gap: f64,
}

fn default_max_row_width() -> f64 {
    900.0
}

fn default_node_gap() -> f64 {
    40.0
}

fn default_rank_gap() -> f64 {
    80.0
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            max_row_width: default_max_row_width(),
            node_gap: default_node_gap(),
            rank_gap: default_rank_gap(),
        }
    }
}

/// Top-level wfkit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WfkitConfig {
    #[serde(default)]
    pub lint: LintSettings,
    #[serde(default)]
    pub diagram: DiagramSettings,
}

/// Resolve the wfkit config directory (~/.wfkit/).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".wfkit"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the config file path (~/.wfkit/config.json5).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json5"))
}

/// Load configuration from the default path, falling back to defaults.
pub fn load_config() -> Result<WfkitConfig, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = config_file_path()?;
    load_config_from(&path)
}

/// Load configuration from a specific path, falling back to defaults if not found.
pub fn load_config_from(path: &Path) -> Result<WfkitConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("Config file not found at {}, using defaults", path.display());
        return Ok(WfkitConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: WfkitConfig = json5::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WfkitConfig::default();
        assert!(config.lint.extra_tools.is_empty());
        assert_eq!(config.diagram.max_row_width, 900.0);
        assert_eq!(config.diagram.rank_gap, 80.0);
    }

    #[test]
    fn test_json5_parse() {
        let json5_str = r#"{
            lint: { extra_tools: ["DeployTool", "internal-search"] },
            diagram: { max_row_width: 1200 },
        }"#;
        let config: WfkitConfig = json5::from_str(json5_str).unwrap();
        assert_eq!(config.lint.extra_tools.len(), 2);
        assert_eq!(config.diagram.max_row_width, 1200.0);
        // unspecified fields keep defaults
        assert_eq!(config.diagram.node_gap, 40.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config_from(Path::new("/nonexistent/config.json5")).unwrap();
        assert!(config.lint.extra_tools.is_empty());
    }
}
