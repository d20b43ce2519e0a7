//! Configuration management for qs-trends

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::window::WindowPreset;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Report settings
    pub report: ReportConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Report rendering defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Window length in days (7, 30, 90 or 365)
    pub window_days: u32,

    /// Print a bar chart per entity
    pub chart: bool,

    /// Width of chart bars in characters
    pub bar_width: usize,

    /// Maximum table rows (0 = all)
    pub limit: usize,
}

// Default implementations

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_days: WindowPreset::default().days(),
            chart: false,
            bar_width: 20,
            limit: 0,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::config("Could not determine config directory"))?;
        Ok(config_dir.join("qs-trends").join("config.toml"))
    }

    /// Validate configuration values.
    ///
    /// Call this after loading to ensure all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if WindowPreset::from_days(self.report.window_days).is_none() {
            let allowed: Vec<u32> = WindowPreset::all().iter().map(|p| p.days()).collect();
            return Err(Error::config(format!(
                "window_days must be one of {:?}, got {}",
                allowed, self.report.window_days
            )));
        }

        if !(1..=80).contains(&self.report.bar_width) {
            return Err(Error::config(format!(
                "bar_width must be between 1 and 80, got {}",
                self.report.bar_width
            )));
        }

        // Validate log_level is a known level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "log_level must be one of {:?}, got '{}'",
                valid_levels, self.general.log_level
            )));
        }

        Ok(())
    }

    /// Window preset named by the report settings.
    pub fn window_preset(&self) -> Result<WindowPreset> {
        WindowPreset::from_days(self.report.window_days).ok_or_else(|| {
            Error::config(format!(
                "unsupported window_days {}",
                self.report.window_days
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.report.window_days, 30);
        assert_eq!(config.window_preset().unwrap(), WindowPreset::Month);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[report]\nwindow_days = 90\n").unwrap();
        assert_eq!(config.report.window_days, 90);
        assert_eq!(config.report.bar_width, 20);
        assert_eq!(config.general.log_level, "warn");
    }

    #[test]
    fn test_validate_rejects_unknown_window() {
        let mut config = Config::default();
        config.report.window_days = 14;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bar_width() {
        let mut config = Config::default();
        config.report.bar_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_log_level() {
        let mut config = Config::default();
        config.general.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.report.window_days = 365;
        config.report.chart = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.report.window_days, 365);
        assert!(loaded.report.chart);
    }
}
