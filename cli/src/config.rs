// Configuration for the Direct Chat CLI
//
// Cross-platform config stored in:
// - macOS/Linux: ~/.config/directchat/config.json
// - Windows: %APPDATA%\directchat\config.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use directchat_core::{Lang, OpenMethod};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UI language for seeded quick messages ("es" or "en")
    pub language: String,

    /// Dial code used when none is given or detected
    pub default_country: String,

    /// How chats open on desktop: "web" or "app"
    pub open_method: String,

    /// Whether `chat` may consult the IP-geolocation lookup
    pub detect_country: bool,

    /// Override for the database location
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Lang::detect().as_str().to_string(),
            default_country: "+1".to_string(),
            open_method: "web".to_string(),
            detect_country: true,
            data_dir: None,
        }
    }
}

impl Config {
    /// Get the config directory path (cross-platform)
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("directchat");

        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Get the data directory path, honoring the `data_dir` override
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .context("Failed to determine data directory")?
                .join("directchat"),
        };

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(data_dir)
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if config_file.exists() {
            let contents =
                std::fs::read_to_string(&config_file).context("Failed to read config file")?;
            let config: Config =
                serde_json::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_file = Self::config_file()?;
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_file, contents).context("Failed to write config file")?;
        Ok(())
    }

    /// Parsed language, falling back to environment detection.
    pub fn language(&self) -> Lang {
        self.language.parse().unwrap_or_else(|_| Lang::detect())
    }

    /// Parsed open method, falling back to WhatsApp Web.
    pub fn open_method(&self) -> OpenMethod {
        self.open_method.parse().unwrap_or(OpenMethod::Web)
    }

    /// Set a config value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "language" => {
                let lang: Lang = value.parse().map_err(anyhow::Error::msg)?;
                self.language = lang.as_str().to_string();
            }
            "default_country" => {
                if value.len() < 2
                    || !value.starts_with('+')
                    || !value[1..].chars().all(|c| c.is_ascii_digit())
                {
                    anyhow::bail!("Invalid dial code: {value} (expected e.g. +34)");
                }
                self.default_country = value.to_string();
            }
            "open_method" => {
                let method: OpenMethod = value.parse().map_err(anyhow::Error::msg)?;
                self.open_method = method.as_str().to_string();
            }
            "detect_country" => {
                self.detect_country = value.parse().context("Invalid boolean value")?;
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        self.save()?;
        Ok(())
    }

    /// Get a config value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "language" => Some(self.language.clone()),
            "default_country" => Some(self.default_country.clone()),
            "open_method" => Some(self.open_method.clone()),
            "detect_country" => Some(self.detect_country.to_string()),
            "data_dir" => self.data_dir.clone(),
            _ => None,
        }
    }

    /// List all config values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("language".to_string(), self.language.clone()),
            ("default_country".to_string(), self.default_country.clone()),
            ("open_method".to_string(), self.open_method.clone()),
            ("detect_country".to_string(), self.detect_country.to_string()),
            (
                "data_dir".to_string(),
                self.data_dir.clone().unwrap_or_else(|| "(auto)".to_string()),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_country, "+1");
        assert_eq!(config.open_method, "web");
        assert!(config.detect_country);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.default_country, deserialized.default_country);
        assert_eq!(config.language, deserialized.language);
    }

    #[test]
    fn test_dial_code_validation() {
        let mut config = Config::default();
        assert!(config.set("default_country", "34").is_err());
        assert!(config.set("default_country", "+3a4").is_err());
    }
}
