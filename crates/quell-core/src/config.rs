//! Client configuration

use crate::error::{QuellError, QuellResult};
use crate::logging::{parse_level, LogConfig, LogFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration of the popup/options client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Queue size of the in-process message channel
    pub channel_capacity: usize,

    /// Log level name (error, warn, info, debug, trace)
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Extensions offered by the custom filter file picker
    pub filter_file_extensions: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            filter_file_extensions: vec!["txt".to_string()],
        }
    }
}

impl ClientConfig {
    /// Default location: `<config dir>/quell/client.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quell")
            .join("client.json")
    }

    /// Load configuration from a JSON file, falling back to defaults if absent
    pub fn load(path: &Path) -> QuellResult<Self> {
        if !path.exists() {
            log::debug!("No client config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            QuellError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        if config.channel_capacity == 0 {
            return Err(QuellError::config("channel_capacity must be at least 1"));
        }

        Ok(config)
    }

    /// Save configuration as pretty JSON
    pub fn save(&self, path: &Path) -> QuellResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Logging setup derived from this configuration
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: parse_level(&self.log_level),
            format: self.log_format,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("client.json")).unwrap();
        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.filter_file_extensions, vec!["txt".to_string()]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        std::fs::write(&path, r#"{"log_level":"debug","log_format":"json"}"#).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.channel_capacity, 32);

        let log = config.log_config();
        assert_eq!(log.level, Level::DEBUG);
        assert_eq!(log.format, LogFormat::Json);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.json");
        std::fs::write(&path, r#"{"channel_capacity":0}"#).unwrap();

        assert!(matches!(ClientConfig::load(&path), Err(QuellError::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("client.json");
        let config = ClientConfig {
            channel_capacity: 4,
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(ClientConfig::load(&path).unwrap().channel_capacity, 4);
    }

    #[test]
    fn test_default_path() {
        assert!(ClientConfig::default_path().ends_with("quell/client.json"));
    }
}
