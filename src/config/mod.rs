use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the configured API key
const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YouTube Data API key for the structured metadata source.
    /// Absence disables that source entirely.
    pub api_key: Option<String>,

    /// Transcript language preference order
    pub languages: Vec<String>,

    /// Target language for per-line translation
    pub translation_language: String,

    /// Directory reports are written to
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            languages: vec!["en".to_string(), "ko".to_string()],
            translation_language: "ko".to_string(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Config {
    /// Load configuration from file or create default.
    /// The API key env var wins over the file so the key never has to be
    /// written to disk.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config
        } else {
            let config = Self::default();
            config.save().await?;
            config
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api_key = Some(key.trim().to_string());
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("transcript-extractor").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            anyhow::bail!("At least one transcript language must be configured");
        }

        if self.translation_language.trim().is_empty() {
            anyhow::bail!("Translation language must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.languages, vec!["en", "ko"]);
        assert_eq!(config.translation_language, "ko");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_validate_rejects_empty_languages() {
        let config = Config {
            languages: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = Config {
            api_key: Some("key123".to_string()),
            ..Config::default()
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.api_key.as_deref(), Some("key123"));
        assert_eq!(parsed.output_dir, PathBuf::from("output"));
    }
}
