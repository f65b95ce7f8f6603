//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the tide-config.toml file.
//! It controls how heights are presented and the shape of the charted window, and it is
//! the one place a different station profile can be substituted for the compiled-in
//! Port San Luis calibration.

use crate::error::ConfigError;
use crate::predictor::HarmonicPredictor;
use crate::renderer::{MAX_CHART_ROWS, MIN_CHART_ROWS};
use crate::series::{DEFAULT_STEP_MINUTES, DEFAULT_WINDOW_HOURS};
use crate::station::StationProfile;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "tide-config.toml";

/// Application configuration loaded from tide-config.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Station selection and height presentation
    #[serde(default)]
    pub station: StationConfig,
    /// Chart configuration
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Station configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StationConfig {
    /// Show heights relative to MSL (true) or the station datum (false).
    /// Default false shows traditional MLLW tide chart values.
    #[serde(default)]
    pub show_msl: bool,
    /// Replacement calibration; the compiled-in Port San Luis profile when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<StationProfile>,
}

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Time window in hours (shows -window to +window from current time)
    pub time_window_hours: i64,
    /// Minutes between samples
    pub step_minutes: i64,
    /// Height of the ASCII chart in text rows
    pub rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            time_window_hours: DEFAULT_WINDOW_HOURS,
            step_minutes: DEFAULT_STEP_MINUTES,
            rows: 24,
        }
    }
}

impl DisplayConfig {
    /// Keep `rows` within what the chart can draw.
    fn clamp_rows(&mut self) {
        let rows = self.rows.clamp(MIN_CHART_ROWS, MAX_CHART_ROWS);
        if rows != self.rows {
            warn!("display.rows = {} out of range, using {}", self.rows, rows);
            self.rows = rows;
        }
    }
}

impl Config {
    /// Load configuration from tide-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(ConfigError::Io(_)) => {
                info!(
                    "No config file at {}, using default configuration (Port San Luis, CA)",
                    path.display()
                );
                Self::default()
            }
            Err(e) => {
                warn!("{}", e);
                warn!("Using default configuration (Port San Luis, CA)");
                Self::default()
            }
        }
    }

    /// Load and validate configuration, surfacing every failure.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        if let Some(profile) = &config.station.profile {
            profile.validate()?;
        }
        config.display.clamp_rows();
        Ok(config)
    }

    /// Save current configuration to tide-config.toml
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(DEFAULT_CONFIG_PATH)
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Build the predictor for the configured station.
    ///
    /// A profile that fails validation is logged and replaced by Port San Luis.
    pub fn predictor(&self) -> HarmonicPredictor {
        match &self.station.profile {
            Some(profile) => HarmonicPredictor::try_new(profile.clone()).unwrap_or_else(|e| {
                warn!("Ignoring configured station profile: {}", e);
                HarmonicPredictor::port_san_luis()
            }),
            None => HarmonicPredictor::port_san_luis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::PORT_SAN_LUIS;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.station.show_msl);
        assert!(config.station.profile.is_none());
        assert_eq!(config.display.time_window_hours, 12);
        assert_eq!(config.display.step_minutes, 10);
        assert_eq!(config.display.rows, 24);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
        assert!(matches!(
            Config::try_load_from_path("/nonexistent/path"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[station]\nshow_msl = true\n").unwrap();
        let config = Config::try_load_from_path(file.path()).unwrap();
        assert!(config.station.show_msl);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "station = [[[").unwrap();
        assert!(matches!(
            Config::try_load_from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_profile_substitution() {
        let mut profile = PORT_SAN_LUIS.clone();
        profile.name = "Shifted".into();
        profile.mean_sea_level = 10.0;
        let config = Config {
            station: StationConfig {
                show_msl: false,
                profile: Some(profile),
            },
            display: DisplayConfig::default(),
        };

        let file = NamedTempFile::new().unwrap();
        config.save_to_path(file.path()).unwrap();
        let loaded = Config::try_load_from_path(file.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.predictor().profile().name, "Shifted");
        assert_eq!(loaded.predictor().profile().mean_sea_level, 10.0);
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut profile = PORT_SAN_LUIS.clone();
        profile.constituents.to_mut()[0].amplitude = -1.0;
        let config = Config {
            station: StationConfig {
                show_msl: false,
                profile: Some(profile),
            },
            display: DisplayConfig::default(),
        };

        let file = NamedTempFile::new().unwrap();
        config.save_to_path(file.path()).unwrap();
        assert!(matches!(
            Config::try_load_from_path(file.path()),
            Err(ConfigError::Profile(_))
        ));
        // The predictor falls back to the compiled-in station
        assert_eq!(config.predictor().profile(), &PORT_SAN_LUIS);
    }

    #[test]
    fn test_rows_are_clamped_on_load() {
        let file = NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "[display]\ntime_window_hours = 12\nstep_minutes = 10\nrows = 10000000000\n",
        )
        .unwrap();
        let config = Config::try_load_from_path(file.path()).unwrap();
        assert_eq!(config.display.rows, MAX_CHART_ROWS);

        fs::write(
            file.path(),
            "[display]\ntime_window_hours = 12\nstep_minutes = 10\nrows = 0\n",
        )
        .unwrap();
        assert_eq!(
            Config::load_from_path(file.path()).display.rows,
            MIN_CHART_ROWS
        );
    }
}
