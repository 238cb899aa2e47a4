//! Configuration management for Scanpay.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::capabilities::{CapabilityRegistry, FeatureId};
use crate::error::{ConfigError, ConfigResult};
use crate::types::Network;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/scanpay/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Network settings
    pub network: NetworkConfig,
    /// Optional scan features
    pub features: FeatureConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SCANPAY_NETWORK`: Override the network (`bitcoin`, `testnet`, `signet`, `regtest`)
    /// - `SCANPAY_BITID_ENABLED`: Override `BitID` login (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(val) = std::env::var("SCANPAY_NETWORK") {
            self.network.kind =
                Network::from_name(&val).ok_or_else(|| ConfigError::InvalidValue {
                    field: "network.kind".to_string(),
                    reason: format!("unknown network '{val}'"),
                })?;
            tracing::debug!("Override network.kind from env: {:?}", self.network.kind);
        }

        if let Ok(val) = std::env::var("SCANPAY_BITID_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.features.bitid_login = enabled;
                tracing::debug!("Override features.bitid_login from env: {}", enabled);
            }
        }

        Ok(())
    }

    /// Save configuration to its default location.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/scanpay/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "scanpay", "scanpay").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Build the capability registry described by this configuration.
    #[must_use]
    pub fn capabilities(&self) -> CapabilityRegistry {
        let mut registry = CapabilityRegistry::new();
        if self.features.bitid_login {
            registry.enable_feature(FeatureId::BitIdLogin);
        }
        registry
    }
}

/// Network settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network that scanned keys and addresses must belong to
    pub kind: Network,
}

/// Optional scan features.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Recognize `bitid:` login requests
    pub bitid_login: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.network.kind, Network::Bitcoin);
        assert!(!config.features.bitid_login);
        assert!(!config
            .capabilities()
            .is_feature_available(FeatureId::BitIdLogin));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[network]"));
        assert!(toml_str.contains("[features]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.network.kind, config.network.kind);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.network.kind = Network::Testnet;
        config.features.bitid_login = true;
        config.save_to(&config_path).expect("save config");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.network.kind, Network::Testnet);
        assert!(loaded.features.bitid_login);
        assert!(loaded
            .capabilities()
            .is_feature_available(FeatureId::BitIdLogin));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded =
            AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load defaults");
        assert_eq!(loaded.network.kind, Network::Bitcoin);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SCANPAY_NETWORK", "regtest");
        std::env::set_var("SCANPAY_BITID_ENABLED", "true");

        let mut config = AppConfig::default();
        config.apply_env_overrides().expect("apply overrides");
        assert_eq!(config.network.kind, Network::Regtest);
        assert!(config.features.bitid_login);

        std::env::set_var("SCANPAY_NETWORK", "dogecoin");
        let mut config = AppConfig::default();
        assert!(matches!(
            config.apply_env_overrides(),
            Err(ConfigError::InvalidValue { .. })
        ));

        std::env::remove_var("SCANPAY_NETWORK");
        std::env::remove_var("SCANPAY_BITID_ENABLED");
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[network]
kind = "signet"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.network.kind, Network::Signet);
        assert!(!config.features.bitid_login);
    }
}
