use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hex color overrides for the button palette ("#RRGGBB" or "#RGB").
/// Anything left unset keeps its default color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Appearance settings. The calculator state itself is never written
/// to disk; a fresh session always starts at "0".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Show the key-hint line under the keypad
    #[serde(default = "default_show_footer")]
    pub show_footer: bool,

    /// Button palette overrides
    #[serde(default)]
    pub colors: ColorOverrides,
}

fn default_show_footer() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            show_footer: true,
            colors: ColorOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("dentaku");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or create it with
    /// defaults on first run
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            return Ok(Self::read(&path));
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Load config from an explicit path (the `--config` flag)
    pub fn load_from(path: &Path) -> Self {
        Self::read(path)
    }

    fn read(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config: {}", e);
                    AppConfig::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            show_footer: false,
            colors: ColorOverrides {
                digit: Some("#555555".to_string()),
                operator: Some("#FF8000".to_string()),
                function: None,
                accent: None,
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.show_footer);
        assert_eq!(config.colors, ColorOverrides::default());
    }

    #[test]
    fn test_load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "show_footer = false\n\n[colors]\ndigit = \"#123456\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert!(!config.show_footer);
        assert_eq!(config.colors.digit.as_deref(), Some("#123456"));
        assert_eq!(config.colors.operator, None);
    }

    #[test]
    fn test_load_from_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "show_footer = \"sideways\"").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }
}
