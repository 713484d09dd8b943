//! Configuration management for certscan.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Platform;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
///
/// Loaded from `~/.config/certscan/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General application settings
    pub general: GeneralConfig,
    /// Local storage settings
    pub storage: StorageConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Platform discriminator override for development builds.
    ///
    /// Normally the platform is resolved from the compile target; setting
    /// this lets a desktop build exercise the android/ios validation rows.
    pub platform_override: Option<String>,
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the local settings database. Defaults to the XDG data dir.
    pub store_path: Option<PathBuf>,

    /// Timeout in milliseconds for persisted-flag I/O.
    ///
    /// Reads and writes of the launch record beyond this bound are treated
    /// as failures (which the flow handles fail-open).
    pub io_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            io_timeout_ms: 2000,
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML or fail validation
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            toml::from_str(&contents)?
        } else {
            tracing::debug!("Config file not found, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `CERTSCAN_PLATFORM`: Override the platform discriminator
    /// - `CERTSCAN_STORE_PATH`: Override the settings database path
    /// - `CERTSCAN_IO_TIMEOUT_MS`: Override the persisted-flag I/O timeout
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        if let Ok(val) = std::env::var("CERTSCAN_PLATFORM") {
            tracing::debug!("Override platform from env: {}", val);
            config.general.platform_override = Some(val);
        }

        if let Ok(val) = std::env::var("CERTSCAN_STORE_PATH") {
            tracing::debug!("Override store_path from env: {}", val);
            config.storage.store_path = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("CERTSCAN_IO_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                tracing::debug!("Override io_timeout_ms from env: {}", ms);
                config.storage.io_timeout_ms = ms;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/certscan/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("us", "certscan", "certscan").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/certscan`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("us", "certscan", "certscan").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve the effective platform: the override if set, the compile
    /// target otherwise.
    #[must_use]
    pub fn resolved_platform(&self) -> Platform {
        self.general
            .platform_override
            .as_deref()
            .map_or_else(Platform::detect, Platform::from_discriminator)
    }

    /// Resolve the settings database path.
    pub fn store_path(&self) -> ConfigResult<PathBuf> {
        match &self.storage.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("certscan.db")),
        }
    }

    /// The persisted-flag I/O timeout as a [`Duration`].
    #[must_use]
    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.storage.io_timeout_ms)
    }

    /// Validate configuration values.
    fn validate(&self) -> ConfigResult<()> {
        if self.storage.io_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.io_timeout_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
