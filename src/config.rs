//! # Configuration Management Module
//!
//! Persistent storage of user preferences and weather service settings.
//! Configuration is stored in a platform-appropriate location using TOML for
//! human readability and easy manual editing.
//!
//! ## Design Philosophy
//!
//! 1. **Fail-safe defaults**: Always provide working defaults if config is missing/corrupt
//! 2. **Partial files load**: Missing keys fall back to their defaults individually
//! 3. **Platform compliance**: Store config files in OS-appropriate locations
//!
//! ## Configuration Storage Locations
//!
//! - **Windows**: `%APPDATA%\Glowclock\config.toml`
//! - **macOS**: `~/Library/Application Support/Glowclock/config.toml`
//! - **Linux**: `~/.config/glowclock/config.toml`

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECONDS, WEATHER_API_BASE_URL, WEATHER_API_KEY_ENV};
use crate::logger::log;
use crate::settings::SettingsModel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Weather service configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    /// API key for the weather service. The `WEATHERAPI` environment
    /// variable takes precedence when set.
    pub api_key: Option<String>,
    /// Base URL of the weather service
    pub base_url: String,
    /// Timeout for a single request (in seconds)
    pub request_timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: WEATHER_API_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl WeatherConfig {
    /// API key to use for requests: environment first, then the config file.
    /// Blank values count as unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(WEATHER_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}

/// Application configuration structure
///
/// `preferences` holds everything the user changes from the running app
/// (theme, clock format, city, playback); `weather` is edited by hand.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub preferences: SettingsModel,
    pub weather: WeatherConfig,
}

impl ClockConfig {
    /// Load configuration from the platform config path, using defaults if the
    /// file doesn't exist or is invalid.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                log::warn!("Failed to get config path: {}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields defaults silently; an unreadable or corrupt file
    /// is logged and also yields defaults, so start-up never fails here.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Failed to parse config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::error!("Failed to read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        log::debug!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Determine the platform-appropriate configuration file path
    ///
    /// Windows and macOS use a capitalised directory name; Linux and other
    /// Unix-like systems follow the lowercase XDG convention.
    pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let base = dirs::config_dir().ok_or("Could not find config directory")?;
        let config_dir = if cfg!(any(target_os = "windows", target_os = "macos")) {
            base.join("Glowclock")
        } else {
            base.join("glowclock")
        };

        Ok(config_dir.join("config.toml"))
    }
}
