use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Recognition server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Photo storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    /// Override for the capture output directory; platform pictures
    /// directory when unset
    pub pictures_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory captures are written to
    pub fn resolve_pictures_dir(&self) -> PathBuf {
        if let Some(dir) = &self.pictures_dir {
            return dir.clone();
        }
        dirs::picture_dir()
            .or_else(dirs::data_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("pill-scanner")
    }
}

/// Text hint (on-device OCR) configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HintConfig {
    pub enabled: bool,
    /// Tesseract language spec; the original recognizer handled Korean,
    /// so Korean stays in the default set
    pub language: String,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "eng+kor".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub hint: HintConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.server.timeout(), Duration::from_secs(10));
        assert!(config.hint.enabled);
        assert!(config.storage.pictures_dir.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"base_url": "http://pill.example", "timeout_secs": 3}}"#)
                .unwrap();
        assert_eq!(config.server.base_url, "http://pill.example");
        assert_eq!(config.hint.language, "eng+kor");
    }

    #[test]
    fn test_pictures_dir_override() {
        let config = StorageConfig {
            pictures_dir: Some(PathBuf::from("/tmp/photos")),
        };
        assert_eq!(config.resolve_pictures_dir(), PathBuf::from("/tmp/photos"));
    }

    #[test]
    fn test_config_round_trip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
