/// Stage configuration, loaded from RON.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::character::FALLBACK_COLOR;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Presentation settings shared by the three surfaces. Every field has a
/// default, so a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Color for dialogue whose character is not in the cast.
    pub fallback_color: String,
    /// Cue lines shown before the rehearsed line.
    pub cue_before: usize,
    /// Cue lines shown after the rehearsed line.
    pub cue_after: usize,
    /// Search results shown at once in the reading view.
    pub result_limit: usize,
    /// Where the reading view persists its expanded scenes, if anywhere.
    pub expansion_store: Option<PathBuf>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            fallback_color: FALLBACK_COLOR.to_string(),
            cue_before: 2,
            cue_after: 2,
            result_limit: 10,
            expansion_store: None,
        }
    }
}

impl StageConfig {
    pub fn load_from_ron(path: &Path) -> Result<StageConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<StageConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StageConfig::default();
        assert_eq!(config.fallback_color, "#6b7280");
        assert_eq!((config.cue_before, config.cue_after), (2, 2));
        assert_eq!(config.result_limit, 10);
        assert!(config.expansion_store.is_none());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = StageConfig::parse_ron("(result_limit: 25, cue_after: 1)").unwrap();
        assert_eq!(config.result_limit, 25);
        assert_eq!(config.cue_after, 1);
        assert_eq!(config.cue_before, 2);
        assert_eq!(config.fallback_color, FALLBACK_COLOR);
    }

    #[test]
    fn expansion_store_path() {
        let config =
            StageConfig::parse_ron(r#"(expansion_store: Some("state/expanded.ron"))"#).unwrap();
        assert_eq!(
            config.expansion_store,
            Some(PathBuf::from("state/expanded.ron"))
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            StageConfig::parse_ron("(result_limit: \"many\")"),
            Err(ConfigError::Ron(_))
        ));
    }
}
